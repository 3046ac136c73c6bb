use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::{
    entities::UserProfile, requests::UpdateUserRequest, responses::UserResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, invalidate_user_cache};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_password_simple, validate_text};

use super::AuthService;

const MAX_DISPLAY_NAME_LEN: usize = 64;
const MAX_BIO_LEN: usize = 2000;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let caller = current_user(request)?;

    // 缓存中的用户不含密码哈希，需读库
    let current = match storage.get_user_by_id(caller.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            error!("Failed to load user {}: {}", caller.id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserUpdateFailed,
                    "Failed to update profile",
                )),
            );
        }
    };

    if let Some(name) = &update_data.display_name
        && let Err(msg) = validate_text("display_name", name, MAX_DISPLAY_NAME_LEN)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Some(bio) = &update_data.bio
        && bio.chars().count() > MAX_BIO_LEN
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!("bio must be at most {MAX_BIO_LEN} characters"),
        )));
    }

    // 修改密码必须提供当前密码
    let mut password = None;
    if let Some(new_password) = &update_data.new_password {
        let Some(current_password) = &update_data.current_password else {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserPasswordInvalid,
                "Current password is required to change the password",
            )));
        };
        if !verify_password(current_password, &current.password_hash) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserPasswordInvalid,
                "Current password is incorrect",
            )));
        }
        if let Err(msg) = validate_password_simple(new_password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
        }
        match hash_password(new_password) {
            Ok(hash) => password = Some(hash),
            Err(e) => {
                error!("Password hashing failed: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::UserUpdateFailed,
                        "Failed to update profile",
                    )),
                );
            }
        }
    }

    let profile = UserProfile {
        display_name: update_data
            .display_name
            .map(|n| n.trim().to_string())
            .unwrap_or(current.profile.display_name.clone()),
        avatar_url: update_data.avatar_url.or(current.profile.avatar_url.clone()),
        bio: update_data.bio.or(current.profile.bio.clone()),
    };

    let password_changed = password.is_some();
    let update = UpdateUserRequest {
        password,
        profile: Some(profile),
        ..Default::default()
    };

    match storage.update_user(current.id, update).await {
        Ok(Some(user)) => {
            invalidate_user_cache(request, user.id).await;
            if password_changed {
                info!("User {} changed their password", user.id);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Profile updated",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            error!("Failed to update profile for {}: {}", current.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserUpdateFailed,
                    "Failed to update profile",
                )),
            )
        }
    }
}
