use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::internal_error,
    submissions::requests::{SubmissionListParams, SubmissionListQuery},
};
use crate::services::{assignments::load_assignment, course_context, current_user};
use crate::utils::csv_export::{csv_attachment, to_csv};

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    params: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if let Err(response) = load_assignment(&storage, course.id, assignment_id).await {
        return Ok(response);
    }

    // 学员只能看到自己的提交
    let query = SubmissionListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        assignment_id,
        student_id: (!access.is_staff()).then_some(user.id),
        status: params.status,
    };

    match storage.list_submissions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list submissions", e)),
    }
}

pub async fn export_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, access) = course_context(request)?;

    if !access.is_staff() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Only course staff can export submissions",
        )));
    }

    if let Err(response) = load_assignment(&storage, course.id, assignment_id).await {
        return Ok(response);
    }

    let rows = match storage.list_submission_export_rows(assignment_id).await {
        Ok(rows) => rows,
        Err(e) => return Ok(internal_error("Failed to export submissions", e)),
    };

    match to_csv(&rows) {
        Ok(body) => Ok(csv_attachment(
            &format!("assignment-{assignment_id}-submissions.csv"),
            body,
        )),
        Err(e) => Ok(internal_error("Failed to export submissions", e)),
    }
}
