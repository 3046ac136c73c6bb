//! 课时存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{CourseHubError, Result};
use crate::models::courses::{
    entities::{Lesson, LessonContentType},
    requests::{CreateLessonRequest, ReorderItem, UpdateLessonRequest},
    responses::ReorderResult,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn list_lessons_impl(&self, module_id: i64) -> Result<Vec<Lesson>> {
        let lessons = Lessons::find()
            .filter(Column::ModuleId.eq(module_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list lessons"))?;

        Ok(lessons.into_iter().map(|m| m.into_lesson()).collect())
    }

    pub async fn get_lesson_impl(&self, course_id: i64, lesson_id: i64) -> Result<Option<Lesson>> {
        let lesson = Lessons::find_by_id(lesson_id)
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query lesson"))?;

        Ok(lesson.map(|m| m.into_lesson()))
    }

    /// 创建课时：序号在章节内顺延
    pub async fn create_lesson_impl(
        &self,
        course_id: i64,
        module_id: i64,
        req: CreateLessonRequest,
    ) -> Result<Lesson> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let max: Option<Option<i32>> = Lessons::find()
            .select_only()
            .column_as(Column::SortOrder.max(), "max_order")
            .filter(Column::ModuleId.eq(module_id))
            .into_tuple()
            .one(&txn)
            .await
            .map_err(db_err("Failed to query lesson order"))?;
        let next_order = max.flatten().unwrap_or(0) + 1;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            course_id: Set(course_id),
            module_id: Set(module_id),
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            content_type: Set(req
                .content_type
                .unwrap_or(LessonContentType::Text)
                .to_string()),
            video_url: Set(req.video_url),
            duration_minutes: Set(req.duration_minutes),
            sort_order: Set(next_order),
            is_preview: Set(req.is_preview),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(db_err("Failed to create lesson"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit lesson creation"))?;

        Ok(result.into_lesson())
    }

    pub async fn update_lesson_impl(
        &self,
        course_id: i64,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        if self.get_lesson_impl(course_id, lesson_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(lesson_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(content) = update.content {
            model.content = Set(Some(content));
        }
        if let Some(content_type) = update.content_type {
            model.content_type = Set(content_type.to_string());
        }
        if let Some(video_url) = update.video_url {
            model.video_url = Set(Some(video_url));
        }
        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(Some(duration));
        }
        if let Some(is_preview) = update.is_preview {
            model.is_preview = Set(is_preview);
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update lesson"))?;

        self.get_lesson_impl(course_id, lesson_id).await
    }

    pub async fn delete_lesson_impl(&self, course_id: i64, lesson_id: i64) -> Result<bool> {
        let result = Lessons::delete_many()
            .filter(Column::Id.eq(lesson_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete lesson"))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量调整章节内课时顺序，与章节排序相同的全有或全无语义
    pub async fn reorder_lessons_impl(
        &self,
        module_id: i64,
        items: &[ReorderItem],
    ) -> Result<Vec<ReorderResult>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let existing: HashMap<i64, i32> = Lessons::find()
            .filter(Column::ModuleId.eq(module_id))
            .filter(Column::Id.is_in(ids))
            .all(&txn)
            .await
            .map_err(db_err("Failed to query lessons"))?
            .into_iter()
            .map(|m| (m.id, m.sort_order))
            .collect();

        if let Some(missing) = items.iter().find(|i| !existing.contains_key(&i.id)) {
            return Err(CourseHubError::validation(format!(
                "Lesson {} does not belong to module {module_id}",
                missing.id
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let changed = existing.get(&item.id) != Some(&item.order);
            if changed {
                ActiveModel {
                    id: Set(item.id),
                    sort_order: Set(item.order),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .update(&txn)
                .await
                .map_err(db_err("Failed to update lesson order"))?;
            }
            results.push(ReorderResult {
                id: item.id,
                order: item.order,
                updated: changed,
            });
        }

        txn.commit()
            .await
            .map_err(db_err("Failed to commit lesson reorder"))?;

        Ok(results)
    }
}
