use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::RegisterRequest,
    users::{
        entities::{UserProfile, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_lowercase();

    // 1. 字段格式
    if let Err(msg) = validate_username(&username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    // 2. 自助注册不能成为管理员
    let role = register_request.role.unwrap_or(UserRole::Student);
    if role == UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Admin accounts cannot be self-registered",
        )));
    }

    // 3. 唯一性
    if let Err(response) = check_username_exists(&storage, &username).await {
        return Ok(response);
    }
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    let create_request = CreateUserRequest {
        username,
        email,
        password: password_hash,
        role,
        profile: UserProfile {
            display_name: register_request
                .display_name
                .map(|n| n.trim().to_string())
                .unwrap_or_default(),
            avatar_url: None,
            bio: None,
        },
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("Registered user {} as {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        // 并发注册时由唯一约束兜底
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "Username or email already exists"),
        )),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}

async fn check_username_exists(storage: &Arc<dyn Storage>, username: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => {
            error!("Failed to check username: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => {
            error!("Failed to check email: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}
