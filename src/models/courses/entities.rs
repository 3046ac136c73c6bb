use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::Assignment;
use crate::models::quizzes::entities::QuizSummary;

string_enum! {
    /// 课程状态
    CourseStatus {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

string_enum! {
    /// 课程难度
    CourseLevel {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

string_enum! {
    /// 课时内容类型
    LessonContentType {
        Text => "text",
        Video => "video",
        Mixed => "mixed",
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: CourseLevel,
    pub price_cents: i64,
    pub currency: String,
    pub status: CourseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_free(&self) -> bool {
        self.price_cents <= 0
    }

    pub fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }
}

// 课程章节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 课时
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub module_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub content_type: LessonContentType,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub sort_order: i32,
    pub is_preview: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 章节大纲：章节及其课时
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleOutline {
    #[serde(flatten)]
    pub module: CourseModule,
    pub lessons: Vec<Lesson>,
}

// 课程大纲
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOutline {
    pub course: Course,
    pub modules: Vec<ModuleOutline>,
    pub quizzes: Vec<QuizSummary>,
    pub assignments: Vec<Assignment>,
}

// 学习进度
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseProgress {
    pub course_id: i64,
    pub completed: u64,
    pub total: u64,
    pub percent: f64,
}

impl CourseProgress {
    pub fn new(course_id: i64, completed: u64, total: u64) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            ((completed as f64 / total as f64) * 10000.0).round() / 100.0
        };
        Self {
            course_id,
            completed,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_rounding() {
        let p = CourseProgress::new(1, 1, 3);
        assert_eq!(p.percent, 33.33);
        assert_eq!(CourseProgress::new(1, 3, 3).percent, 100.0);
    }

    #[test]
    fn test_progress_without_lessons() {
        assert_eq!(CourseProgress::new(1, 0, 0).percent, 0.0);
    }

    #[test]
    fn test_course_status_strings() {
        assert_eq!(CourseStatus::Published.to_string(), "published");
        assert_eq!("archived".parse::<CourseStatus>(), Ok(CourseStatus::Archived));
        assert!("deleted".parse::<CourseStatus>().is_err());
    }
}
