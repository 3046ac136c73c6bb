use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CreateModuleRequest, ReorderRequest, UpdateModuleRequest};
use crate::services::ModuleService;
use crate::utils::SafeModuleIdI64;

// 懒加载的全局 ModuleService 实例
static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);

pub async fn list_modules(req: HttpRequest) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.list_modules(&req).await
}

pub async fn create_module(
    req: HttpRequest,
    body: web::Json<CreateModuleRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.create_module(&req, body.into_inner()).await
}

pub async fn update_module(
    req: HttpRequest,
    path: SafeModuleIdI64,
    body: web::Json<UpdateModuleRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE
        .update_module(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_module(req: HttpRequest, path: SafeModuleIdI64) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.delete_module(&req, path.0).await
}

// 批量调整模块顺序
pub async fn reorder_modules(
    req: HttpRequest,
    body: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.reorder_modules(&req, body.into_inner()).await
}

// 挂载在 /api/v1/courses 作用域下
pub fn configure_module_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/modules")
            .route(
                web::get()
                    .to(list_modules)
                    .wrap(middlewares::RequireCourseAccess::any()),
            )
            .route(
                web::post()
                    .to(create_module)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    // 须在 /{module_id} 之前注册
    .service(
        web::resource("/{course_id}/modules/reorder")
            .route(web::put().to(reorder_modules))
            .wrap(middlewares::RequireCourseAccess::staff()),
    )
    .service(
        web::resource("/{course_id}/modules/{module_id}")
            .route(web::put().to(update_module))
            .route(web::delete().to(delete_module))
            .wrap(middlewares::RequireCourseAccess::staff()),
    );
}
