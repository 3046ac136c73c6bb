use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QuizService, load_quiz};
use crate::middlewares::CourseAccess;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    quizzes::{requests::SubmitAttemptRequest, responses::AttemptListResponse},
};
use crate::services::{course_context, current_user};

pub async fn submit_attempt(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    attempt: SubmitAttemptRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if access != CourseAccess::Enrolled {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "Only enrolled students can attempt quizzes",
        )));
    }

    let quiz = match load_quiz(&storage, course.id, quiz_id).await {
        Ok(quiz) => quiz,
        Err(response) => return Ok(response),
    };

    let grade = match quiz.grade(&attempt.answers) {
        Ok(grade) => grade,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::QuizAnswerInvalid, msg)));
        }
    };

    match storage
        .create_quiz_attempt(&quiz, user.id, attempt.answers, grade)
        .await
    {
        Ok(recorded) => {
            info!(
                "User {} attempt {} on quiz {}: {} (passed: {})",
                user.id, recorded.attempt_number, quiz.id, recorded.score, recorded.passed
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(recorded, "Attempt recorded")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::QuizAttemptsExhausted)),
    }
}

pub async fn list_attempts(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if let Err(response) = load_quiz(&storage, course.id, quiz_id).await {
        return Ok(response);
    }

    // 课程管理者看全部，学员只看自己的
    let owner = (!access.is_staff()).then_some(user.id);
    match storage.list_quiz_attempts(quiz_id, owner).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttemptListResponse { items },
            "Attempt list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list attempts", e)),
    }
}
