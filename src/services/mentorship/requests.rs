use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{MentorshipService, own_profile_id};
use crate::errors::CourseHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    mentorship::{
        entities::MentorshipRequestStatus,
        requests::{CreateMentorshipRequest, RespondMentorshipRequest},
        responses::MentorshipRequestListResponse,
    },
    notifications::entities::{NewNotification, NotificationType},
    users::entities::UserRole,
};
use crate::services::current_user;
use crate::utils::validate::validate_text;

pub async fn create_request(
    service: &MentorshipService,
    request: &HttpRequest,
    profile_id: i64,
    request_data: CreateMentorshipRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Some(message) = &request_data.message
        && let Err(msg) = validate_text("message", message, 2000)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let profile = match storage.get_mentor_profile(profile_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MentorProfileNotFound,
                "Mentor profile not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load mentor profile", e)),
    };

    if profile.user_id == user.id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Cannot request mentorship from yourself",
        )));
    }

    let created = match storage
        .create_mentorship_request(&profile, user.id, request_data.message)
        .await
    {
        Ok(created) => created,
        Err(e @ CourseHubError::Conflict(_)) => {
            return Ok(storage_error_response(&e, ErrorCode::MentorshipRequestDuplicate));
        }
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::MentorNotAccepting)),
    };

    info!(
        "User {} requested mentorship from profile {}",
        user.id, profile.id
    );

    let notification = NewNotification::new(
        profile.user_id,
        NotificationType::Mentorship,
        format!("New mentorship request from {}", user.username),
    )
    .reference("mentorship_request", created.id);
    if let Err(e) = storage.create_notification(notification).await {
        warn!("Failed to notify mentor {}: {}", profile.user_id, e);
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(created, "Mentorship request sent")))
}

pub async fn list_requests(
    service: &MentorshipService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    // 导师看收到的申请，其他人看自己发出的，管理员看全部
    let (profile_filter, student_filter) = match user.role {
        UserRole::Admin => (None, None),
        UserRole::Mentor => match own_profile_id(&storage, user.id).await {
            Ok(Some(profile_id)) => (Some(profile_id), None),
            Ok(None) => {
                return Ok(HttpResponse::Ok().json(ApiResponse::success(
                    MentorshipRequestListResponse { items: Vec::new() },
                    "Mentorship request list retrieved successfully",
                )));
            }
            Err(response) => return Ok(response),
        },
        _ => (None, Some(user.id)),
    };

    match storage
        .list_mentorship_requests(profile_filter, student_filter)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MentorshipRequestListResponse { items },
            "Mentorship request list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list mentorship requests", e)),
    }
}

pub async fn respond_request(
    service: &MentorshipService,
    request: &HttpRequest,
    request_id: i64,
    response_data: RespondMentorshipRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let existing = match storage.get_mentorship_request(request_id).await {
        Ok(Some(existing)) => existing,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MentorshipRequestNotFound,
                "Mentorship request not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load mentorship request", e)),
    };

    match own_profile_id(&storage, user.id).await {
        Ok(Some(profile_id)) if profile_id == existing.mentor_profile_id => {}
        Ok(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only the requested mentor can respond",
            )));
        }
        Err(response) => return Ok(response),
    }

    if response_data.status == MentorshipRequestStatus::Pending {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MentorshipStatusInvalid,
            "A request can only be accepted or rejected",
        )));
    }

    let updated = match storage
        .respond_mentorship_request(existing.id, response_data.status, response_data.response_note)
        .await
    {
        Ok(updated) => updated,
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::MentorshipStatusInvalid)),
    };

    info!("Mentorship request {} {}", updated.id, updated.status);

    let notification = NewNotification::new(
        updated.student_id,
        NotificationType::Mentorship,
        format!("Your mentorship request was {}", updated.status),
    )
    .reference("mentorship_request", updated.id);
    if let Err(e) = storage.create_notification(notification).await {
        warn!("Failed to notify student {}: {}", updated.student_id, e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Mentorship request updated")))
}
