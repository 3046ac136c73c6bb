use serde::Serialize;

use super::entities::{Quiz, QuizAttempt};

#[derive(Debug, Serialize)]
pub struct QuizListResponse {
    pub items: Vec<Quiz>,
}

#[derive(Debug, Serialize)]
pub struct AttemptListResponse {
    pub items: Vec<QuizAttempt>,
}
