use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ForumService, load_thread};
use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery,
    common::response::internal_error,
    forums::{
        requests::{CreateThreadRequest, ThreadListParams, UpdateThreadRequest},
        responses::ThreadDetailResponse,
    },
};
use crate::services::{course_context, current_user};
use crate::utils::validate::validate_text;

fn validate_thread_fields(title: Option<&str>, body: Option<&str>) -> Result<(), String> {
    if let Some(title) = title {
        validate_text("title", title, 200)?;
    }
    if let Some(body) = body {
        validate_text("body", body, 20_000)?;
    }
    Ok(())
}

/// 编辑权限：作者改标题正文，课程管理者置顶锁定
fn check_update_permission(
    update: &UpdateThreadRequest,
    is_author: bool,
    is_staff: bool,
) -> Result<(), &'static str> {
    let edits_content = update.title.is_some() || update.body.is_some();
    let moderates = update.is_pinned.is_some() || update.is_locked.is_some();
    if edits_content && !is_author {
        return Err("Only the author can edit this thread");
    }
    if moderates && !is_staff {
        return Err("Only course staff can pin or lock threads");
    }
    Ok(())
}

pub async fn list_threads(
    service: &ForumService,
    request: &HttpRequest,
    params: ThreadListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    let search = params.search.filter(|s| !s.trim().is_empty());
    match storage
        .list_threads(course.id, params.pagination, search)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Thread list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list threads", e)),
    }
}

pub async fn create_thread(
    service: &ForumService,
    request: &HttpRequest,
    thread_data: CreateThreadRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = validate_thread_fields(Some(&thread_data.title), Some(&thread_data.body)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.create_thread(course.id, user.id, thread_data).await {
        Ok(thread) => {
            info!("User {} opened thread {} in course {}", user.id, thread.id, course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(thread, "Thread created")))
        }
        Err(e) => Ok(internal_error("Failed to create thread", e)),
    }
}

pub async fn get_thread(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
    pagination: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    let thread = match load_thread(&storage, course.id, thread_id).await {
        Ok(thread) => thread,
        Err(response) => return Ok(response),
    };

    match storage.list_posts(thread.id, pagination).await {
        Ok((posts, pagination)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ThreadDetailResponse {
                thread,
                posts,
                pagination,
            },
            "Thread retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list posts", e)),
    }
}

pub async fn update_thread(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
    update_data: UpdateThreadRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    let thread = match load_thread(&storage, course.id, thread_id).await {
        Ok(thread) => thread,
        Err(response) => return Ok(response),
    };

    if let Err(msg) =
        check_update_permission(&update_data, thread.author_id == user.id, access.is_staff())
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg)));
    }

    if let Err(msg) =
        validate_thread_fields(update_data.title.as_deref(), update_data.body.as_deref())
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.update_thread(thread.id, update_data).await {
        Ok(Some(thread)) => Ok(HttpResponse::Ok().json(ApiResponse::success(thread, "Thread updated"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ThreadNotFound,
            "Thread not found",
        ))),
        Err(e) => Ok(internal_error("Failed to update thread", e)),
    }
}

pub async fn delete_thread(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    let thread = match load_thread(&storage, course.id, thread_id).await {
        Ok(thread) => thread,
        Err(response) => return Ok(response),
    };

    if thread.author_id != user.id && !access.is_staff() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the author or course staff can delete this thread",
        )));
    }

    match storage.delete_thread(thread.id).await {
        Ok(true) => {
            info!("Thread {} deleted by user {}", thread.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Thread deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ThreadNotFound,
            "Thread not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete thread", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_permissions() {
        let edit = UpdateThreadRequest {
            title: Some("New".into()),
            ..Default::default()
        };
        let lock = UpdateThreadRequest {
            is_locked: Some(true),
            ..Default::default()
        };

        assert!(check_update_permission(&edit, true, false).is_ok());
        assert!(check_update_permission(&edit, false, true).is_err());
        assert!(check_update_permission(&lock, true, false).is_err());
        assert!(check_update_permission(&lock, false, true).is_ok());
    }
}
