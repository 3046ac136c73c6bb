use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubmissionService, access::authorize_submission};
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::storage_error_response,
    submissions::{entities::SubmissionStatus, requests::SubmitFeedbackRequest},
};
use crate::services::current_user;
use crate::utils::validate::validate_text;

pub async fn submit_feedback(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    feedback_data: SubmitFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let submission = match authorize_submission(&storage, &user, submission_id).await {
        Ok((submission, _, _)) if submission.student_id == user.id => submission,
        Ok(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only the author can respond to a revision request",
            )));
        }
        Err(response) => return Ok(response),
    };

    if submission.status != SubmissionStatus::RevisionRequested {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubmissionStatusInvalid,
            "Submission is not awaiting revision",
        )));
    }

    if let Err(msg) = validate_text("content", &feedback_data.content, 100_000) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.resubmit_submission(submission.id, feedback_data).await {
        Ok(updated) => {
            info!(
                "Submission {} resubmitted (revision {})",
                updated.id, updated.revision_count
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Submission resubmitted")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::SubmissionStatusInvalid)),
    }
}
