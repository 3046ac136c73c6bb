use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, invalidate_course_cache};
use crate::middlewares::CourseAccess;
use crate::models::{ApiResponse, ErrorCode, common::response::internal_error};
use crate::services::course_context;

pub async fn delete_course(service: &CourseService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, access) = course_context(request)?;

    // 已有学员的课程只有管理员能删除
    if access != CourseAccess::Admin {
        match storage.count_course_enrollments(course.id).await {
            Ok(0) => {}
            Ok(count) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::CourseHasEnrollments,
                    format!("Course has {count} enrollments and cannot be deleted"),
                )));
            }
            Err(e) => return Ok(internal_error("Failed to delete course", e)),
        }
    }

    match storage.delete_course(course.id).await {
        Ok(true) => {
            invalidate_course_cache(request, course.id).await;
            info!("Course {} deleted", course.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete course", e)),
    }
}
