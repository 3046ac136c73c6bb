use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{
    CreateReviewRequest, CreateSubmissionRequest, SubmissionListParams, SubmitFeedbackRequest,
};
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeSubmissionIdI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建提交
pub async fn create_submission(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, path.0, body.into_inner())
        .await
}

// 列出提交，学员只能看到自己的
pub async fn list_submissions(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, path.0, query.into_inner())
        .await
}

// 导出提交 CSV
pub async fn export_submissions(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.export_submissions(&req, path.0).await
}

// 获取提交详情
pub async fn get_submission(
    req: HttpRequest,
    path: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

// 批阅提交
pub async fn create_review(
    req: HttpRequest,
    path: SafeSubmissionIdI64,
    body: web::Json<CreateReviewRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_review(&req, path.0, body.into_inner())
        .await
}

pub async fn list_reviews(req: HttpRequest, path: SafeSubmissionIdI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_reviews(&req, path.0).await
}

// 学员回应修改意见
pub async fn submit_feedback(
    req: HttpRequest,
    path: SafeSubmissionIdI64,
    body: web::Json<SubmitFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit_feedback(&req, path.0, body.into_inner())
        .await
}

// 作业下的提交路由，挂载在 /api/v1/courses 作用域下
pub fn configure_assignment_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/assignments/{assignment_id}/submissions")
            .route(web::post().to(create_submission))
            .route(web::get().to(list_submissions))
            .wrap(middlewares::RequireCourseAccess::any()),
    )
    .service(
        web::resource("/{course_id}/assignments/{assignment_id}/submissions/export")
            .route(web::get().to(export_submissions))
            .wrap(middlewares::RequireCourseAccess::staff()),
    );
}

// 配置路由
//
// 提交详情、批阅和反馈的权限涉及导师关系，由业务层判断
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .route("/{submission_id}", web::get().to(get_submission))
            .route("/{submission_id}/reviews", web::post().to(create_review))
            .route("/{submission_id}/reviews", web::get().to(list_reviews))
            .route("/{submission_id}/feedback", web::post().to(submit_feedback)),
    );
}
