//! 学习进度存储操作

use std::collections::HashSet;

use super::{SeaOrmStorage, db_err};
use crate::entity::lesson_progress::{ActiveModel, Column, Entity as LessonProgress};
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::entity::quiz_attempts::{Column as AttemptColumn, Entity as QuizAttempts};
use crate::entity::quizzes::{Column as QuizColumn, Entity as Quizzes};
use crate::errors::Result;
use crate::models::certificates::entities::CourseCompletion;
use crate::models::courses::entities::CourseProgress;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 标记课时完成；重复标记不会产生新记录
    pub async fn mark_lesson_complete_impl(
        &self,
        user_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<CourseProgress> {
        let existing = LessonProgress::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::LessonId.eq(lesson_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query lesson progress"))?;

        if existing.is_none() {
            let model = ActiveModel {
                user_id: Set(user_id),
                lesson_id: Set(lesson_id),
                course_id: Set(course_id),
                completed_at: Set(chrono::Utc::now().timestamp()),
                ..Default::default()
            };
            if let Err(e) = model.insert(&self.db).await {
                // 并发的重复标记撞上唯一索引，视为已完成
                let err = db_err("Failed to record lesson progress")(e);
                if !err.is_unique_violation() {
                    return Err(err);
                }
            }
        }

        self.get_course_progress_impl(user_id, course_id).await
    }

    pub async fn get_course_progress_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<CourseProgress> {
        let total = Lessons::find()
            .filter(LessonColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count lessons"))?;

        let completed = LessonProgress::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count completed lessons"))?;

        Ok(CourseProgress::new(course_id, completed.min(total), total))
    }

    /// 结业判定：课时完成情况与测验通过情况
    pub async fn get_course_completion_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<CourseCompletion> {
        let progress = self.get_course_progress_impl(user_id, course_id).await?;

        let quiz_ids: Vec<i64> = Quizzes::find()
            .select_only()
            .column(QuizColumn::Id)
            .filter(QuizColumn::CourseId.eq(course_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query quizzes"))?;

        let passed: HashSet<i64> = if quiz_ids.is_empty() {
            HashSet::new()
        } else {
            QuizAttempts::find()
                .select_only()
                .column(AttemptColumn::QuizId)
                .filter(AttemptColumn::UserId.eq(user_id))
                .filter(AttemptColumn::Passed.eq(true))
                .filter(AttemptColumn::QuizId.is_in(quiz_ids.clone()))
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(db_err("Failed to query quiz attempts"))?
                .into_iter()
                .collect()
        };

        Ok(CourseCompletion {
            lessons_total: progress.total,
            lessons_completed: progress.completed,
            quizzes_total: quiz_ids.len() as u64,
            quizzes_passed: passed.len() as u64,
        })
    }
}
