/*!
 * JWT 认证中间件
 *
 * 验证访问令牌，将当前用户写入请求扩展，供后续中间件和处理程序使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/courses")
 *         .wrap(RequireJWT)
 *         .route("", web::get().to(list_courses)),
 * )
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user_claims(&req)` 或
 * `RequireJWT::extract_user_id(&req)` 获取当前用户。
 *
 * ## 认证流程
 *
 * 1. 令牌取自 `Authorization: Bearer <token>`，缺失时取 `access_token` Cookie
 * 2. 校验签名、过期时间和令牌类型
 * 3. 按用户 ID 从资源缓存读取用户，未命中则查库并回填
 * 4. 非活跃用户一律拒绝（用户被修改或删除时缓存由对应服务失效）
 */

use crate::cache::{ResourceCache, ResourceKind};
use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// 读取用户：先查资源缓存，未命中则查库并回填
async fn load_user(req: &ServiceRequest, user_id: i64) -> Result<User, String> {
    let cache = req
        .app_data::<web::Data<ResourceCache>>()
        .map(|c| c.get_ref().clone());

    if let Some(cache) = &cache {
        if let Some(user) = cache.get::<User>(ResourceKind::User, user_id).await {
            return Ok(user);
        }
        debug!("User cache miss for ID: {}", user_id);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not registered in app data");
            "Authentication backend unavailable".to_string()
        })?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            "Failed to retrieve user".to_string()
        })?
        .ok_or_else(|| "User not found".to_string())?;

    if let Some(cache) = &cache {
        cache.set(ResourceKind::User, user_id, &user).await;
    }

    Ok(user)
}

// 提取并验证访问令牌，返回当前用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, String> {
    let token = JwtUtils::extract_access_token(req.request())
        .ok_or_else(|| "Missing access token".to_string())?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid or expired access token".to_string()
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in token".to_string())?;

    let user = load_user(req, user_id).await?;

    // 缓存命中时同样校验状态
    if user.status != UserStatus::Active {
        return Err("User is not active".to_string());
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserProfile;
    use actix_web::{App, HttpRequest, HttpResponse, test};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireJWT::extract_user_id(&req) {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/p")
                    .wrap(RequireJWT)
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/p").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/p")
                    .wrap(RequireJWT)
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/p")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[::core::prelude::v1::test]
    fn test_extract_helpers_read_extensions() {
        let req = test::TestRequest::default().to_http_request();
        assert!(RequireJWT::extract_user_id(&req).is_none());

        let now = chrono::Utc::now();
        req.extensions_mut().insert(User {
            id: 7,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            role: UserRole::Mentor,
            status: UserStatus::Active,
            profile: UserProfile::default(),
            last_login: None,
            created_at: now,
            updated_at: now,
        });
        assert_eq!(RequireJWT::extract_user_id(&req), Some(7));
        assert_eq!(RequireJWT::extract_user_role(&req), Some(UserRole::Mentor));
    }
}
