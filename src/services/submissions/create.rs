use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::SubmissionService;
use crate::middlewares::CourseAccess;
use crate::models::{
    ApiResponse, ErrorCode, common::response::storage_error_response,
    submissions::requests::CreateSubmissionRequest,
};
use crate::services::{assignments::load_assignment, course_context, current_user};
use crate::utils::validate::validate_text;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    submission_data: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if access != CourseAccess::Enrolled {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "Only enrolled students can submit assignments",
        )));
    }

    if let Err(msg) = validate_text("content", &submission_data.content, 100_000) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let assignment = match load_assignment(&storage, course.id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(response) => return Ok(response),
    };

    let is_late = assignment.is_past_due(Utc::now());
    if is_late && !assignment.allow_late {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubmissionDeadlinePassed,
            "The deadline for this assignment has passed",
        )));
    }

    match storage
        .create_submission(assignment.id, user.id, submission_data, is_late)
        .await
    {
        Ok(submission) => {
            info!(
                "User {} submitted assignment {} (late: {})",
                user.id, assignment.id, is_late
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "Submission created")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::SubmissionAlreadyExists)),
    }
}
