use std::collections::HashSet;

use serde::Deserialize;

use super::entities::{CourseLevel, CourseStatus, LessonContentType};

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct CourseListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    /// 仅列出与自己相关的课程：讲师为自己创建的，学员为已选的
    pub mine: Option<bool>,
}

// 课程列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub status: Option<CourseStatus>,
    pub instructor_id: Option<i64>,
    pub enrolled_user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    /// 仅管理员可指定讲师
    pub instructor_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<CourseStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLessonRequest {
    pub title: String,
    pub content: Option<String>,
    pub content_type: Option<LessonContentType>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub is_preview: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub content_type: Option<LessonContentType>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub is_preview: Option<bool>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReorderItem {
    pub id: i64,
    pub order: i32,
}

// 排序请求（章节与课时共用）
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

impl ReorderRequest {
    /// 校验排序批次本身的合法性，归属关系由存储层在事务内校验
    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("Reorder items must not be empty".into());
        }

        let mut ids = HashSet::new();
        let mut orders = HashSet::new();
        for item in &self.items {
            if item.order < 1 {
                return Err(format!("Order for item {} must be at least 1", item.id));
            }
            if !ids.insert(item.id) {
                return Err(format!("Duplicate item id {}", item.id));
            }
            if !orders.insert(item.order) {
                return Err(format!("Duplicate order value {}", item.order));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(items: &[(i64, i32)]) -> ReorderRequest {
        ReorderRequest {
            items: items
                .iter()
                .map(|&(id, order)| ReorderItem { id, order })
                .collect(),
        }
    }

    #[test]
    fn test_reorder_accepts_permutation() {
        assert!(req(&[(3, 1), (1, 2), (2, 3)]).validate().is_ok());
    }

    #[test]
    fn test_reorder_rejects_empty() {
        assert!(req(&[]).validate().is_err());
    }

    #[test]
    fn test_reorder_rejects_duplicate_ids() {
        let err = req(&[(1, 1), (1, 2)]).validate().unwrap_err();
        assert!(err.contains("Duplicate item id"));
    }

    #[test]
    fn test_reorder_rejects_duplicate_orders() {
        let err = req(&[(1, 2), (2, 2)]).validate().unwrap_err();
        assert!(err.contains("Duplicate order"));
    }

    #[test]
    fn test_reorder_rejects_non_positive_order() {
        assert!(req(&[(1, 0)]).validate().is_err());
    }
}
