use serde::Serialize;

use super::entities::{Submission, SubmissionReview};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub items: Vec<SubmissionReview>,
}

// 评审后的结果
#[derive(Debug, Serialize)]
pub struct ReviewResultResponse {
    pub review: SubmissionReview,
    pub submission: Submission,
}
