use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LessonService, lesson_not_found};
use crate::middlewares::require_course_access::resolve_course_access;
use crate::models::{ApiResponse, ErrorCode, common::response::internal_error};
use crate::services::current_user;

/// 试看课时对所有登录用户开放，其余课时需要课程访问权限
pub async fn get_lesson(
    service: &LessonService,
    request: &HttpRequest,
    course_id: i64,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load course", e)),
    };

    let lesson = match storage.get_lesson(course.id, lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => return Ok(lesson_not_found()),
        Err(e) => return Ok(internal_error("Failed to load lesson", e)),
    };

    let access = match resolve_course_access(&storage, &user, &course).await {
        Ok(access) => access,
        Err(e) => return Ok(internal_error("Failed to resolve course access", e)),
    };

    let visible = match access {
        Some(_) => true,
        None => course.is_published() && lesson.is_preview,
    };
    if !visible {
        if !course.is_published() {
            return Ok(lesson_not_found());
        }
        info!("User {} denied access to lesson {}", user.id, lesson.id);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Enroll in the course to access this lesson",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "Lesson retrieved successfully")))
}
