use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// 通知类型
    NotificationType {
        Enrollment => "enrollment",
        Review => "review",
        Mentorship => "mentorship",
        Payment => "payment",
        Certificate => "certificate",
        System => "system",
    }
}

// 通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// 新通知
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
}

impl NewNotification {
    pub fn new(user_id: i64, notification_type: NotificationType, title: impl Into<String>) -> Self {
        Self {
            user_id,
            notification_type,
            title: title.into(),
            content: None,
            reference_type: None,
            reference_id: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn reference(mut self, reference_type: &str, reference_id: i64) -> Self {
        self.reference_type = Some(reference_type.to_string());
        self.reference_id = Some(reference_id);
        self
    }
}
