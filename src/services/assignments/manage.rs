use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    common::response::{internal_error, storage_error_response},
};
use crate::services::{
    course_context, courses::invalidate_course_cache, current_user, lessons::load_module,
};
use crate::utils::validate::validate_text;

fn validate_assignment_fields(title: Option<&str>, max_score: Option<f64>) -> Result<(), String> {
    if let Some(title) = title {
        validate_text("title", title, 200)?;
    }
    if let Some(max_score) = max_score
        && !(max_score > 0.0 && max_score.is_finite())
    {
        return Err("max_score must be a positive number".into());
    }
    Ok(())
}

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match storage.list_assignments(course.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentListResponse { items },
            "Assignment list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list assignments", e)),
    }
}

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) =
        validate_assignment_fields(Some(&assignment_data.title), Some(assignment_data.max_score))
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Some(module_id) = assignment_data.module_id
        && let Err(response) = load_module(&storage, course.id, module_id).await
    {
        return Ok(response);
    }

    match storage.create_assignment(course.id, user.id, assignment_data).await {
        Ok(assignment) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "Assignment created")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ValidationFailed)),
    }
}

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match load_assignment(&storage, course.id, assignment_id).await {
        Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = validate_assignment_fields(update_data.title.as_deref(), update_data.max_score) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage
        .update_assignment(course.id, assignment_id, update_data)
        .await
    {
        Ok(Some(assignment)) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "Assignment updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ValidationFailed)),
    }
}

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match storage.delete_assignment(course.id, assignment_id).await {
        Ok(true) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete assignment", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_score_must_be_positive() {
        assert!(validate_assignment_fields(Some("Essay"), Some(100.0)).is_ok());
        assert!(validate_assignment_fields(None, Some(0.0)).is_err());
        assert!(validate_assignment_fields(None, Some(f64::NAN)).is_err());
        assert!(validate_assignment_fields(Some(""), None).is_err());
    }
}
