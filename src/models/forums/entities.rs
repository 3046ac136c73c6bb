use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 讨论主题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: i64,
    pub course_id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub reply_count: i32,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 回复
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: i64,
    pub thread_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
