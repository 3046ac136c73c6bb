use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{entities::validate_criteria, requests::UpsertRubricRequest},
    common::response::{internal_error, storage_error_response},
};
use crate::services::course_context;
use crate::utils::validate::validate_text;

pub async fn get_rubric(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(response) = load_assignment(&storage, course.id, assignment_id).await {
        return Ok(response);
    }

    match storage.get_rubric(assignment_id).await {
        Ok(Some(rubric)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            rubric,
            "Rubric retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RubricNotFound,
            "Rubric not found",
        ))),
        Err(e) => Ok(internal_error("Failed to load rubric", e)),
    }
}

pub async fn upsert_rubric(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    rubric_data: UpsertRubricRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = validate_text("title", &rubric_data.title, 200) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::RubricInvalid, msg)));
    }
    if let Err(msg) = validate_criteria(&rubric_data.criteria) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::RubricInvalid, msg)));
    }

    if let Err(response) = load_assignment(&storage, course.id, assignment_id).await {
        return Ok(response);
    }

    match storage.upsert_rubric(assignment_id, rubric_data).await {
        Ok(rubric) => Ok(HttpResponse::Ok().json(ApiResponse::success(rubric, "Rubric saved"))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::RubricInvalid)),
    }
}
