use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub unread_only: Option<bool>,
}
