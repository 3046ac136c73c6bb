pub mod profiles;
pub mod requests;
pub mod sessions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    common::response::internal_error,
    mentorship::requests::{
        CreateMentorshipRequest, CreateSessionRequest, MentorListParams,
        RespondMentorshipRequest, UpdateSessionRequest, UpsertMentorProfileRequest,
    },
};
use crate::storage::Storage;

storage_service!(MentorshipService);

impl MentorshipService {
    pub async fn list_mentors(
        &self,
        request: &HttpRequest,
        params: MentorListParams,
    ) -> ActixResult<HttpResponse> {
        profiles::list_mentors(self, request, params).await
    }

    pub async fn get_mentor(&self, request: &HttpRequest, profile_id: i64) -> ActixResult<HttpResponse> {
        profiles::get_mentor(self, request, profile_id).await
    }

    /// 导师维护自己的资料
    pub async fn upsert_my_profile(
        &self,
        request: &HttpRequest,
        profile_data: UpsertMentorProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::upsert_my_profile(self, request, profile_data).await
    }

    pub async fn create_request(
        &self,
        request: &HttpRequest,
        profile_id: i64,
        request_data: CreateMentorshipRequest,
    ) -> ActixResult<HttpResponse> {
        requests::create_request(self, request, profile_id, request_data).await
    }

    pub async fn list_requests(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        requests::list_requests(self, request).await
    }

    pub async fn respond_request(
        &self,
        request: &HttpRequest,
        request_id: i64,
        response_data: RespondMentorshipRequest,
    ) -> ActixResult<HttpResponse> {
        requests::respond_request(self, request, request_id, response_data).await
    }

    pub async fn create_session(
        &self,
        request: &HttpRequest,
        request_id: i64,
        session_data: CreateSessionRequest,
    ) -> ActixResult<HttpResponse> {
        sessions::create_session(self, request, request_id, session_data).await
    }

    pub async fn list_sessions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        sessions::list_sessions(self, request).await
    }

    pub async fn update_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
        update_data: UpdateSessionRequest,
    ) -> ActixResult<HttpResponse> {
        sessions::update_session(self, request, session_id, update_data).await
    }
}

/// 当前用户的导师资料 ID，没有资料时为 None
pub(crate) async fn own_profile_id(
    storage: &Arc<dyn Storage>,
    user_id: i64,
) -> Result<Option<i64>, HttpResponse> {
    storage
        .get_mentor_profile_by_user(user_id)
        .await
        .map(|profile| profile.map(|p| p.id))
        .map_err(|e| internal_error("Failed to load mentor profile", e))
}
