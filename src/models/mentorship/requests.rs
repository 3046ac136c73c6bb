use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::{MentorshipRequestStatus, SessionStatus};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize)]
pub struct MentorListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    /// 按专长关键字搜索
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertMentorProfileRequest {
    pub headline: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub hourly_rate_cents: Option<i64>,
    pub max_mentees: i32,
    #[serde(default = "default_accepting")]
    pub is_accepting: bool,
}

fn default_accepting() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateMentorshipRequest {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RespondMentorshipRequest {
    pub status: MentorshipRequestStatus,
    pub response_note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub topic: Option<String>,
    pub meeting_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub status: Option<SessionStatus>,
    pub notes: Option<String>,
}
