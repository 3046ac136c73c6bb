use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::common::response::internal_error;
use crate::models::users::responses::UserDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to get user information", e)),
    };

    match storage.list_user_enrollments(user.id).await {
        Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserDetailResponse { user, enrollments },
            "User information retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load user enrollments", e)),
    }
}
