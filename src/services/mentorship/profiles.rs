use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, info};

use super::MentorshipService;
use crate::cache::ResourceKind;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::internal_error,
    mentorship::{
        entities::MentorProfile,
        requests::{MentorListParams, UpsertMentorProfileRequest},
    },
};
use crate::services::{current_user, resource_cache};
use crate::utils::validate::validate_text;

const MAX_EXPERTISE_TAGS: usize = 20;
const MAX_MENTEES_LIMIT: i32 = 100;

fn validate_profile(profile: &UpsertMentorProfileRequest) -> Result<(), String> {
    validate_text("headline", &profile.headline, 120)?;
    if let Some(bio) = &profile.bio {
        validate_text("bio", bio, 5000)?;
    }
    if profile.expertise.len() > MAX_EXPERTISE_TAGS {
        return Err(format!("At most {MAX_EXPERTISE_TAGS} expertise tags are allowed"));
    }
    for tag in &profile.expertise {
        validate_text("expertise", tag, 50)?;
    }
    if profile.hourly_rate_cents.is_some_and(|rate| rate < 0) {
        return Err("hourly_rate_cents must not be negative".into());
    }
    if !(1..=MAX_MENTEES_LIMIT).contains(&profile.max_mentees) {
        return Err(format!("max_mentees must be between 1 and {MAX_MENTEES_LIMIT}"));
    }
    Ok(())
}

pub async fn list_mentors(
    service: &MentorshipService,
    request: &HttpRequest,
    params: MentorListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let search = params.search.filter(|s| !s.trim().is_empty());
    match storage.list_mentor_profiles(params.pagination, search).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Mentor list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list mentors", e)),
    }
}

pub async fn get_mentor(
    service: &MentorshipService,
    request: &HttpRequest,
    profile_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = resource_cache(request);

    if let Some(cache) = &cache
        && let Some(profile) = cache
            .get::<MentorProfile>(ResourceKind::MentorProfile, profile_id)
            .await
    {
        debug!("Mentor profile {} served from cache", profile_id);
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Mentor profile retrieved successfully",
        )));
    }

    match storage.get_mentor_profile(profile_id).await {
        Ok(Some(profile)) => {
            if let Some(cache) = &cache {
                cache.set(ResourceKind::MentorProfile, profile_id, &profile).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                profile,
                "Mentor profile retrieved successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MentorProfileNotFound,
            "Mentor profile not found",
        ))),
        Err(e) => Ok(internal_error("Failed to load mentor profile", e)),
    }
}

pub async fn upsert_my_profile(
    service: &MentorshipService,
    request: &HttpRequest,
    profile_data: UpsertMentorProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Err(msg) = validate_profile(&profile_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.upsert_mentor_profile(user.id, profile_data).await {
        Ok(profile) => {
            if let Some(cache) = resource_cache(request) {
                cache.invalidate(ResourceKind::MentorProfile, profile.id).await;
            }
            info!("Mentor profile {} saved for user {}", profile.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "Mentor profile saved")))
        }
        Err(e) => Ok(internal_error("Failed to save mentor profile", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UpsertMentorProfileRequest {
        UpsertMentorProfileRequest {
            headline: "Rust mentor".into(),
            bio: None,
            expertise: vec!["rust".into(), "async".into()],
            hourly_rate_cents: Some(5000),
            max_mentees: 3,
            is_accepting: true,
        }
    }

    #[test]
    fn test_profile_validation() {
        assert!(validate_profile(&profile()).is_ok());

        let mut p = profile();
        p.max_mentees = 0;
        assert!(validate_profile(&p).is_err());

        let mut p = profile();
        p.hourly_rate_cents = Some(-1);
        assert!(validate_profile(&p).is_err());

        let mut p = profile();
        p.expertise = vec!["x".into(); MAX_EXPERTISE_TAGS + 1];
        assert!(validate_profile(&p).is_err());
    }
}
