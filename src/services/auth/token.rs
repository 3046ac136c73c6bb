use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::responses::{RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse},
    users::entities::UserStatus,
};
use crate::services::current_user;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Refresh token missing",
        )));
    };

    let (user_id, access_token) = match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(pair) => pair,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid or expired refresh token",
            )));
        }
    };

    // 令牌签发后账户可能已被停用
    let storage = service.get_storage(request)?;
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => {}
        Ok(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "User is not active",
            )));
        }
        Err(e) => {
            return Ok(crate::models::common::response::internal_error(
                "Failed to refresh token",
                e,
            ));
        }
    }

    let response = RefreshTokenResponse {
        access_token: access_token.clone(),
        expires_in: service.get_config().jwt.access_token_expiry * 60,
    };

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_access_token_cookie(&access_token))
        .json(ApiResponse::success(response, "Token refreshed")))
}

pub async fn handle_verify_token(request: &HttpRequest) -> ActixResult<HttpResponse> {
    // 能走到这里说明 RequireJWT 已通过
    let is_valid = current_user(request).is_ok();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid },
        "Token verified",
    )))
}

pub async fn handle_get_user(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user },
        "User information retrieved",
    )))
}
