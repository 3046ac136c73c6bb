//! 提交评审实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submission_reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub reviewer_id: i64,
    pub decision: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub criterion_scores: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_review(self) -> crate::models::submissions::entities::SubmissionReview {
        use crate::models::submissions::entities::{ReviewDecision, SubmissionReview};

        SubmissionReview {
            id: self.id,
            submission_id: self.submission_id,
            reviewer_id: self.reviewer_id,
            decision: self.decision.parse().unwrap_or(ReviewDecision::Graded),
            score: self.score,
            criterion_scores: self
                .criterion_scores
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            comment: self.comment,
            created_at: to_datetime(self.created_at),
        }
    }
}
