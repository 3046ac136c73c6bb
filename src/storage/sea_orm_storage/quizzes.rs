//! 测验存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::quiz_attempts::{
    ActiveModel as AttemptActiveModel, Column as AttemptColumn, Entity as QuizAttempts,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{CourseHubError, Result};
use crate::models::quizzes::{
    entities::{Quiz, QuizAttempt, QuizGrade},
    requests::{CreateQuizRequest, UpdateQuizRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_quiz_impl(&self, course_id: i64, req: CreateQuizRequest) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();
        let questions = serde_json::to_string(&req.questions)?;

        let model = ActiveModel {
            course_id: Set(course_id),
            module_id: Set(req.module_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            passing_score: Set(req.passing_score),
            max_attempts: Set(req.max_attempts),
            time_limit_minutes: Set(req.time_limit_minutes),
            questions: Set(questions),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create quiz"))?;

        Ok(result.into_quiz())
    }

    pub async fn get_quiz_impl(&self, course_id: i64, quiz_id: i64) -> Result<Option<Quiz>> {
        let quiz = Quizzes::find_by_id(quiz_id)
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query quiz"))?;

        Ok(quiz.map(|m| m.into_quiz()))
    }

    pub async fn list_quizzes_impl(&self, course_id: i64) -> Result<Vec<Quiz>> {
        let quizzes = Quizzes::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list quizzes"))?;

        Ok(quizzes.into_iter().map(|m| m.into_quiz()).collect())
    }

    pub async fn update_quiz_impl(
        &self,
        course_id: i64,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> Result<Option<Quiz>> {
        if self.get_quiz_impl(course_id, quiz_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(quiz_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(passing_score) = update.passing_score {
            model.passing_score = Set(passing_score);
        }
        if let Some(max_attempts) = update.max_attempts {
            model.max_attempts = Set(Some(max_attempts));
        }
        if let Some(limit) = update.time_limit_minutes {
            model.time_limit_minutes = Set(Some(limit));
        }
        if let Some(questions) = update.questions {
            model.questions = Set(serde_json::to_string(&questions)?);
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update quiz"))?;

        self.get_quiz_impl(course_id, quiz_id).await
    }

    pub async fn delete_quiz_impl(&self, course_id: i64, quiz_id: i64) -> Result<bool> {
        let result = Quizzes::delete_many()
            .filter(Column::Id.eq(quiz_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete quiz"))?;

        Ok(result.rows_affected > 0)
    }

    /// 记录一次作答；次数检查与写入在同一事务内
    pub async fn create_quiz_attempt_impl(
        &self,
        quiz: &Quiz,
        user_id: i64,
        answers: Vec<usize>,
        grade: QuizGrade,
    ) -> Result<QuizAttempt> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let used = QuizAttempts::find()
            .filter(AttemptColumn::QuizId.eq(quiz.id))
            .filter(AttemptColumn::UserId.eq(user_id))
            .count(&txn)
            .await
            .map_err(db_err("Failed to count quiz attempts"))?;

        if let Some(max) = quiz.max_attempts
            && used >= max.max(0) as u64
        {
            return Err(CourseHubError::conflict(format!(
                "Maximum of {max} attempts reached for this quiz"
            )));
        }

        let model = AttemptActiveModel {
            quiz_id: Set(quiz.id),
            user_id: Set(user_id),
            answers: Set(serde_json::to_string(&answers)?),
            score: Set(grade.score),
            passed: Set(grade.passed),
            attempt_number: Set(used as i32 + 1),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        // 并发作答会撞上 (quiz_id, user_id, attempt_number) 唯一索引
        let result = model.insert(&txn).await.map_err(|e| {
            let err = db_err("Failed to record quiz attempt")(e);
            if err.is_unique_violation() {
                CourseHubError::conflict("Another attempt was recorded concurrently, please retry")
            } else {
                err
            }
        })?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit quiz attempt"))?;

        Ok(result.into_attempt())
    }

    pub async fn list_quiz_attempts_impl(
        &self,
        quiz_id: i64,
        user_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>> {
        let mut select = QuizAttempts::find().filter(AttemptColumn::QuizId.eq(quiz_id));
        if let Some(user_id) = user_id {
            select = select.filter(AttemptColumn::UserId.eq(user_id));
        }

        let attempts = select
            .order_by_asc(AttemptColumn::UserId)
            .order_by_asc(AttemptColumn::AttemptNumber)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list quiz attempts"))?;

        Ok(attempts.into_iter().map(|m| m.into_attempt()).collect())
    }
}
