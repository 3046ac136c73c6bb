use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, create::validate_price, invalidate_course_cache};
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::storage_error_response,
    courses::requests::UpdateCourseRequest,
};
use crate::services::course_context;
use crate::utils::validate::validate_text;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Some(title) = &update_data.title
        && let Err(msg) = validate_text("title", title, 200)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Err(msg) = validate_price(update_data.price_cents, update_data.currency.as_deref()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let status_change = update_data.status.filter(|s| *s != course.status);

    match storage.update_course(course.id, update_data).await {
        Ok(Some(updated)) => {
            invalidate_course_cache(request, course.id).await;
            if let Some(status) = status_change {
                info!("Course {} status changed to {}", course.id, status);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Course updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ValidationFailed)),
    }
}
