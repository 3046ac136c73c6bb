use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::{
    ApiResponse, PaginationQuery,
    common::response::internal_error,
    notifications::{requests::NotificationListParams, responses::UnreadCountResponse},
};
use crate::services::current_user;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

fn pagination(params: &NotificationListParams) -> PaginationQuery {
    PaginationQuery {
        page: params.page.unwrap_or(1).max(1),
        size: params
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    }
}

pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    params: NotificationListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage
        .list_notifications(
            user.id,
            pagination(&params),
            params.unread_only.unwrap_or(false),
        )
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Notification list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list notifications", e)),
    }
}

pub async fn get_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.count_unread_notifications(user.id).await {
        Ok(unread_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { unread_count },
            "Unread count retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to count unread notifications", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_bounds() {
        let p = pagination(&NotificationListParams {
            page: None,
            size: None,
            unread_only: None,
        });
        assert_eq!((p.page, p.size), (1, DEFAULT_PAGE_SIZE));

        let p = pagination(&NotificationListParams {
            page: Some(0),
            size: Some(1000),
            unread_only: Some(true),
        });
        assert_eq!((p.page, p.size), (1, MAX_PAGE_SIZE));
    }
}
