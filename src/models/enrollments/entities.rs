use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// 选课状态
    EnrollmentStatus {
        Active => "active",
        Completed => "completed",
    }
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

// 学员视角的选课记录，附带课程标题
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course_title: String,
    pub course_slug: String,
}

// 课程花名册条目
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub username: String,
    pub email: String,
    pub display_name: String,
}
