use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::UserService;
use crate::utils::SafeUserIdI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(body.into_inner(), &req).await
}

/// 全部用户导出为 CSV
pub async fn export_users(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.export_users(&req).await
}

pub async fn get_user(req: HttpRequest, path: SafeUserIdI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(path.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    path: SafeUserIdI64,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(path.0, body.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, path: SafeUserIdI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(path.0, &req).await
}

// 用户管理，仅管理员
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(RequireRole::new_any(UserRole::admin_roles()))
            .wrap(RequireJWT)
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/export", web::get().to(export_users))
            .route("/{user_id}", web::get().to(get_user))
            .route("/{user_id}", web::put().to(update_user))
            .route("/{user_id}", web::delete().to(delete_user)),
    );
}
