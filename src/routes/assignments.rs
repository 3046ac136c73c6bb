use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::submissions;
use crate::middlewares;
use crate::models::assignments::requests::{
    CreateAssignmentRequest, UpdateAssignmentRequest, UpsertRubricRequest,
};
use crate::services::AssignmentService;
use crate::utils::SafeAssignmentIdI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req).await
}

pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

pub async fn get_assignment(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

pub async fn update_assignment(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.0).await
}

// 获取评分细则
pub async fn get_rubric(req: HttpRequest, path: SafeAssignmentIdI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_rubric(&req, path.0).await
}

// 创建或覆盖评分细则
pub async fn upsert_rubric(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    body: web::Json<UpsertRubricRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .upsert_rubric(&req, path.0, body.into_inner())
        .await
}

// 挂载在 /api/v1/courses 作用域下
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/assignments")
            .route(
                web::get()
                    .to(list_assignments)
                    .wrap(middlewares::RequireCourseAccess::any()),
            )
            .route(
                web::post()
                    .to(create_assignment)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    .service(
        web::resource("/{course_id}/assignments/{assignment_id}")
            .route(
                web::get()
                    .to(get_assignment)
                    .wrap(middlewares::RequireCourseAccess::any()),
            )
            .route(
                web::put()
                    .to(update_assignment)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            )
            .route(
                web::delete()
                    .to(delete_assignment)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    .service(
        web::resource("/{course_id}/assignments/{assignment_id}/rubric")
            .route(
                web::get()
                    .to(get_rubric)
                    .wrap(middlewares::RequireCourseAccess::any()),
            )
            .route(
                web::put()
                    .to(upsert_rubric)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    .configure(submissions::configure_assignment_submission_routes);
}
