use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::{MentorshipService, own_profile_id};
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    mentorship::{
        entities::{MentorshipRequestStatus, SESSION_MAX_MINUTES, SESSION_MIN_MINUTES},
        requests::{CreateSessionRequest, UpdateSessionRequest},
        responses::SessionListResponse,
    },
    notifications::entities::{NewNotification, NotificationType},
    users::entities::{User, UserRole},
};
use crate::services::current_user;
use crate::storage::Storage;

fn validate_schedule(
    starts_at: DateTime<Utc>,
    duration_minutes: i32,
    now: DateTime<Utc>,
) -> Result<(), String> {
    if starts_at <= now {
        return Err("Session must start in the future".into());
    }
    if !(SESSION_MIN_MINUTES..=SESSION_MAX_MINUTES).contains(&duration_minutes) {
        return Err(format!(
            "Session duration must be between {SESSION_MIN_MINUTES} and {SESSION_MAX_MINUTES} minutes"
        ));
    }
    Ok(())
}

fn not_a_party() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "Only the mentor or the student can manage this session",
    ))
}

/// 当前用户是否为该辅导关系的一方
async fn is_party(
    storage: &Arc<dyn Storage>,
    user: &User,
    mentor_profile_id: i64,
    student_id: i64,
) -> Result<bool, HttpResponse> {
    if user.id == student_id {
        return Ok(true);
    }
    Ok(own_profile_id(storage, user.id).await? == Some(mentor_profile_id))
}

pub async fn create_session(
    service: &MentorshipService,
    request: &HttpRequest,
    request_id: i64,
    session_data: CreateSessionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let mentorship = match storage.get_mentorship_request(request_id).await {
        Ok(Some(mentorship)) => mentorship,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MentorshipRequestNotFound,
                "Mentorship request not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load mentorship request", e)),
    };

    match is_party(&storage, &user, mentorship.mentor_profile_id, mentorship.student_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(not_a_party()),
        Err(response) => return Ok(response),
    }

    if mentorship.status != MentorshipRequestStatus::Accepted {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MentorshipStatusInvalid,
            "Sessions can only be scheduled for accepted requests",
        )));
    }

    if let Err(msg) = validate_schedule(
        session_data.starts_at,
        session_data.duration_minutes,
        Utc::now(),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SessionInvalid, msg)));
    }

    let session = match storage.create_session(&mentorship, session_data).await {
        Ok(session) => session,
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::SessionConflict)),
    };

    info!(
        "Session {} scheduled for request {} at {}",
        session.id,
        mentorship.id,
        session.starts_at.to_rfc3339()
    );

    // 通知另一方
    let recipient = if user.id == mentorship.student_id {
        match storage.get_mentor_profile(mentorship.mentor_profile_id).await {
            Ok(Some(profile)) => Some(profile.user_id),
            _ => None,
        }
    } else {
        Some(mentorship.student_id)
    };
    if let Some(recipient) = recipient {
        let notification = NewNotification::new(
            recipient,
            NotificationType::Mentorship,
            "A mentorship session was scheduled",
        )
        .content(format!(
            "Starts at {} for {} minutes",
            session.starts_at.to_rfc3339(),
            session.duration_minutes
        ))
        .reference("mentorship_session", session.id);
        if let Err(e) = storage.create_notification(notification).await {
            warn!("Failed to notify user {}: {}", recipient, e);
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(session, "Session scheduled")))
}

pub async fn list_sessions(
    service: &MentorshipService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let (profile_filter, student_filter) = match user.role {
        UserRole::Admin => (None, None),
        UserRole::Mentor => match own_profile_id(&storage, user.id).await {
            Ok(Some(profile_id)) => (Some(profile_id), None),
            Ok(None) => {
                return Ok(HttpResponse::Ok().json(ApiResponse::success(
                    SessionListResponse { items: Vec::new() },
                    "Session list retrieved successfully",
                )));
            }
            Err(response) => return Ok(response),
        },
        _ => (None, Some(user.id)),
    };

    match storage.list_sessions(profile_filter, student_filter).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SessionListResponse { items },
            "Session list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list sessions", e)),
    }
}

pub async fn update_session(
    service: &MentorshipService,
    request: &HttpRequest,
    session_id: i64,
    update_data: UpdateSessionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let session = match storage.get_session(session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SessionNotFound,
                "Session not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load session", e)),
    };

    match is_party(&storage, &user, session.mentor_profile_id, session.student_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(not_a_party()),
        Err(response) => return Ok(response),
    }

    match storage.update_session(session.id, update_data).await {
        Ok(updated) => {
            info!("Session {} updated: {}", updated.id, updated.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Session updated")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::SessionInvalid)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_schedule_validation() {
        let now = Utc::now();
        let later = now + Duration::days(1);
        assert!(validate_schedule(later, 60, now).is_ok());
        assert!(validate_schedule(now - Duration::minutes(1), 60, now).is_err());
        assert!(validate_schedule(later, SESSION_MIN_MINUTES - 1, now).is_err());
        assert!(validate_schedule(later, SESSION_MAX_MINUTES + 1, now).is_err());
        assert!(validate_schedule(later, SESSION_MAX_MINUTES, now).is_ok());
    }
}
