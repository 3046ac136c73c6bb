use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, load_quiz};
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    quizzes::{
        requests::{CreateQuizRequest, UpdateQuizRequest, validate_quiz_fields},
        responses::QuizListResponse,
    },
};
use crate::services::{course_context, courses::invalidate_course_cache, lessons::load_module};

pub async fn list_quizzes(service: &QuizService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, access) = course_context(request)?;

    match storage.list_quizzes(course.id).await {
        Ok(quizzes) => {
            let items = if access.is_staff() {
                quizzes
            } else {
                quizzes.into_iter().map(|q| q.without_answers()).collect()
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QuizListResponse { items },
                "Quiz list retrieved successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to list quizzes", e)),
    }
}

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_data: CreateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = validate_quiz_fields(
        Some(&quiz_data.title),
        Some(quiz_data.passing_score),
        quiz_data.max_attempts,
        Some(&quiz_data.questions),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::QuizInvalid, msg)));
    }

    if let Some(module_id) = quiz_data.module_id
        && let Err(response) = load_module(&storage, course.id, module_id).await
    {
        return Ok(response);
    }

    match storage.create_quiz(course.id, quiz_data).await {
        Ok(quiz) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(quiz, "Quiz created")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::QuizInvalid)),
    }
}

pub async fn get_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, access) = course_context(request)?;

    let quiz = match load_quiz(&storage, course.id, quiz_id).await {
        Ok(quiz) => quiz,
        Err(response) => return Ok(response),
    };

    // 学员看不到正确答案
    let quiz = if access.is_staff() {
        quiz
    } else {
        quiz.without_answers()
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(quiz, "Quiz retrieved successfully")))
}

pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    update_data: UpdateQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = validate_quiz_fields(
        update_data.title.as_deref(),
        update_data.passing_score,
        update_data.max_attempts,
        update_data.questions.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::QuizInvalid, msg)));
    }

    match storage.update_quiz(course.id, quiz_id, update_data).await {
        Ok(Some(quiz)) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(quiz, "Quiz updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::QuizInvalid)),
    }
}

pub async fn delete_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match storage.delete_quiz(course.id, quiz_id).await {
        Ok(true) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Quiz deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete quiz", e)),
    }
}
