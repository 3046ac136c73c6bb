use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ForumService, load_thread};
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    forums::requests::CreatePostRequest,
};
use crate::services::{course_context, current_user};
use crate::utils::validate::validate_text;

pub async fn create_post(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
    post_data: CreatePostRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if let Err(msg) = validate_text("body", &post_data.body, 20_000) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let thread = match load_thread(&storage, course.id, thread_id).await {
        Ok(thread) => thread,
        Err(response) => return Ok(response),
    };

    // 锁定后只有课程管理者能回复
    if thread.is_locked && !access.is_staff() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ThreadLocked,
            "Thread is locked",
        )));
    }

    match storage
        .create_post(thread.id, user.id, post_data.body, access.is_staff())
        .await
    {
        Ok(post) => Ok(HttpResponse::Created().json(ApiResponse::success(post, "Reply posted"))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ThreadLocked)),
    }
}

pub async fn delete_post(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
    post_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    if let Err(response) = load_thread(&storage, course.id, thread_id).await {
        return Ok(response);
    }

    let post = match storage.get_post(thread_id, post_id).await {
        Ok(Some(post)) => post,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::PostNotFound,
                "Post not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load post", e)),
    };

    if post.author_id != user.id && !access.is_staff() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the author or course staff can delete this post",
        )));
    }

    match storage.delete_post(thread_id, post.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Post deleted"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PostNotFound,
            "Post not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete post", e)),
    }
}
