use serde::Serialize;

use super::entities::{Course, CourseModule, Lesson};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct ModuleListResponse {
    pub items: Vec<CourseModule>,
}

#[derive(Debug, Serialize)]
pub struct LessonListResponse {
    pub items: Vec<Lesson>,
}

// 单条排序结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReorderResult {
    pub id: i64,
    pub order: i32,
    pub updated: bool,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub items: Vec<ReorderResult>,
}
