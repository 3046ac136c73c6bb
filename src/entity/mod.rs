//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

use chrono::{DateTime, Utc};

pub mod prelude;

pub mod assignments;
pub mod certificates;
pub mod course_modules;
pub mod courses;
pub mod enrollments;
pub mod forum_posts;
pub mod forum_threads;
pub mod lesson_progress;
pub mod lessons;
pub mod mentor_profiles;
pub mod mentorship_requests;
pub mod mentorship_sessions;
pub mod notifications;
pub mod payments;
pub mod quiz_attempts;
pub mod quizzes;
pub mod rubrics;
pub mod submission_reviews;
pub mod submissions;
pub mod users;

/// Unix 秒级时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
