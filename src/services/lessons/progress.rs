use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, lesson_not_found};
use crate::middlewares::CourseAccess;
use crate::models::{ApiResponse, ErrorCode, common::response::internal_error};
use crate::services::{course_context, current_user};

fn not_enrolled() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::NotEnrolled,
        "Only enrolled students track progress",
    ))
}

pub async fn complete_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if access != CourseAccess::Enrolled {
        return Ok(not_enrolled());
    }

    match storage.get_lesson(course.id, lesson_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(lesson_not_found()),
        Err(e) => return Ok(internal_error("Failed to load lesson", e)),
    }

    match storage.mark_lesson_complete(user.id, course.id, lesson_id).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Lesson marked as complete",
        ))),
        Err(e) => Ok(internal_error("Failed to record lesson progress", e)),
    }
}

pub async fn get_progress(service: &LessonService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if access != CourseAccess::Enrolled {
        return Ok(not_enrolled());
    }

    match storage.get_course_progress(user.id, course.id).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Course progress retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load course progress", e)),
    }
}
