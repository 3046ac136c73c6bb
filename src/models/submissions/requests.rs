use serde::Deserialize;

use super::entities::{CriterionScore, ReviewDecision, SubmissionStatus};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub content: String,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<SubmissionStatus>,
}

// 提交列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: i64,
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub decision: ReviewDecision,
    pub score: Option<f64>,
    pub criterion_scores: Option<Vec<CriterionScore>>,
    pub comment: Option<String>,
}

// 学员针对修改意见的回复
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub content: String,
    pub note: Option<String>,
    pub attachment_url: Option<String>,
}
