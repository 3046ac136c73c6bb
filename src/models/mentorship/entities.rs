use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 辅导时长下限（分钟）
pub const SESSION_MIN_MINUTES: i32 = 15;
/// 辅导时长上限（分钟）
pub const SESSION_MAX_MINUTES: i32 = 240;

string_enum! {
    /// 辅导申请状态
    MentorshipRequestStatus {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
    }
}

string_enum! {
    /// 辅导会话状态
    SessionStatus {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

// 导师资料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    pub id: i64,
    pub user_id: i64,
    pub headline: String,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub hourly_rate_cents: Option<i64>,
    pub max_mentees: i32,
    pub is_accepting: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 辅导申请
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorshipRequest {
    pub id: i64,
    pub mentor_profile_id: i64,
    pub student_id: i64,
    pub message: Option<String>,
    pub status: MentorshipRequestStatus,
    pub response_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

// 辅导会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorshipSession {
    pub id: i64,
    pub request_id: i64,
    pub mentor_profile_id: i64,
    pub student_id: i64,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub topic: Option<String>,
    pub meeting_url: Option<String>,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MentorshipSession {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at + chrono::Duration::minutes(self.duration_minutes as i64)
    }

    /// 两个半开区间 [start, end) 是否重叠
    pub fn overlaps(&self, starts_at: DateTime<Utc>, duration_minutes: i32) -> bool {
        let ends_at = starts_at + chrono::Duration::minutes(duration_minutes as i64);
        self.starts_at < ends_at && starts_at < self.ends_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_at(hour: u32, minutes: i32) -> MentorshipSession {
        let start = Utc.with_ymd_and_hms(2030, 1, 1, hour, 0, 0).unwrap();
        MentorshipSession {
            id: 1,
            request_id: 1,
            mentor_profile_id: 1,
            student_id: 2,
            starts_at: start,
            duration_minutes: minutes,
            topic: None,
            meeting_url: None,
            status: SessionStatus::Scheduled,
            notes: None,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_overlap_detection() {
        let s = session_at(10, 60);
        let at = |h, m| Utc.with_ymd_and_hms(2030, 1, 1, h, m, 0).unwrap();
        assert!(s.overlaps(at(10, 30), 30));
        assert!(s.overlaps(at(9, 30), 45));
        assert!(!s.overlaps(at(11, 0), 30));
        assert!(!s.overlaps(at(9, 0), 60));
    }
}
