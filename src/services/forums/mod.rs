pub mod posts;
pub mod threads;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery,
    common::response::internal_error,
    forums::{
        entities::ForumThread,
        requests::{CreatePostRequest, CreateThreadRequest, ThreadListParams, UpdateThreadRequest},
    },
};
use crate::storage::Storage;

storage_service!(ForumService);

impl ForumService {
    pub async fn list_threads(
        &self,
        request: &HttpRequest,
        params: ThreadListParams,
    ) -> ActixResult<HttpResponse> {
        threads::list_threads(self, request, params).await
    }

    pub async fn create_thread(
        &self,
        request: &HttpRequest,
        thread_data: CreateThreadRequest,
    ) -> ActixResult<HttpResponse> {
        threads::create_thread(self, request, thread_data).await
    }

    /// 主题详情与分页回复
    pub async fn get_thread(
        &self,
        request: &HttpRequest,
        thread_id: i64,
        pagination: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        threads::get_thread(self, request, thread_id, pagination).await
    }

    pub async fn update_thread(
        &self,
        request: &HttpRequest,
        thread_id: i64,
        update_data: UpdateThreadRequest,
    ) -> ActixResult<HttpResponse> {
        threads::update_thread(self, request, thread_id, update_data).await
    }

    pub async fn delete_thread(
        &self,
        request: &HttpRequest,
        thread_id: i64,
    ) -> ActixResult<HttpResponse> {
        threads::delete_thread(self, request, thread_id).await
    }

    pub async fn create_post(
        &self,
        request: &HttpRequest,
        thread_id: i64,
        post_data: CreatePostRequest,
    ) -> ActixResult<HttpResponse> {
        posts::create_post(self, request, thread_id, post_data).await
    }

    pub async fn delete_post(
        &self,
        request: &HttpRequest,
        thread_id: i64,
        post_id: i64,
    ) -> ActixResult<HttpResponse> {
        posts::delete_post(self, request, thread_id, post_id).await
    }
}

pub(crate) async fn load_thread(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    thread_id: i64,
) -> Result<ForumThread, HttpResponse> {
    match storage.get_thread(course_id, thread_id).await {
        Ok(Some(thread)) => Ok(thread),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ThreadNotFound,
            "Thread not found",
        ))),
        Err(e) => Err(internal_error("Failed to load thread", e)),
    }
}
