//! 测验作答实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    pub passed: bool,
    pub attempt_number: i32,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(self) -> crate::models::quizzes::entities::QuizAttempt {
        crate::models::quizzes::entities::QuizAttempt {
            id: self.id,
            quiz_id: self.quiz_id,
            user_id: self.user_id,
            answers: serde_json::from_str(&self.answers).unwrap_or_default(),
            score: self.score,
            passed: self.passed,
            attempt_number: self.attempt_number,
            submitted_at: to_datetime(self.submitted_at),
        }
    }
}
