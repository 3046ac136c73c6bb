pub mod attempts;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    common::response::internal_error,
    quizzes::{
        entities::Quiz,
        requests::{CreateQuizRequest, SubmitAttemptRequest, UpdateQuizRequest},
    },
};
use crate::storage::Storage;

storage_service!(QuizService);

impl QuizService {
    pub async fn list_quizzes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::list_quizzes(self, request).await
    }

    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        quiz_data: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_quiz(self, request, quiz_data).await
    }

    pub async fn get_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        manage::get_quiz(self, request, quiz_id).await
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        update_data: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_quiz(self, request, quiz_id, update_data).await
    }

    pub async fn delete_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        manage::delete_quiz(self, request, quiz_id).await
    }

    // 提交作答
    pub async fn submit_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        attempt: SubmitAttemptRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::submit_attempt(self, request, quiz_id, attempt).await
    }

    pub async fn list_attempts(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        attempts::list_attempts(self, request, quiz_id).await
    }
}

pub(crate) async fn load_quiz(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    quiz_id: i64,
) -> Result<Quiz, HttpResponse> {
    match storage.get_quiz(course_id, quiz_id).await {
        Ok(Some(quiz)) => Ok(quiz),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Err(internal_error("Failed to load quiz", e)),
    }
}
