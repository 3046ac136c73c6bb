use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::{
    ApiResponse, ErrorCode, common::response::internal_error,
    notifications::responses::MarkAllReadResponse,
};
use crate::services::current_user;

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NotificationNotFound,
        "Notification not found",
    ))
}

// 只能操作自己的通知，别人的一律按不存在处理
pub async fn mark_as_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.mark_notification_read(user.id, notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification marked as read"))),
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to mark notification as read", e)),
    }
}

pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.mark_all_notifications_read(user.id).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "All notifications marked as read",
        ))),
        Err(e) => Ok(internal_error("Failed to mark notifications as read", e)),
    }
}

pub async fn delete_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.delete_notification(user.id, notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification deleted"))),
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to delete notification", e)),
    }
}
