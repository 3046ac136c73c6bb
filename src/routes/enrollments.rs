use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::RosterListParams;
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// 选课，未选课时没有课程访问权限，由业务层加载课程
pub async fn enroll(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(&req, path.0).await
}

// 退课
pub async fn unenroll(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.unenroll(&req, path.0).await
}

// 我的选课记录
pub async fn list_my_enrollments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_my_enrollments(&req).await
}

// 课程花名册
pub async fn list_roster(
    req: HttpRequest,
    query: web::Query<RosterListParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_roster(&req, query.into_inner())
        .await
}

pub async fn export_roster(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.export_roster(&req).await
}

// 挂载在 /api/v1/courses 作用域下
pub fn configure_course_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/enroll")
            .route(
                web::post()
                    .to(enroll)
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            )
            .route(web::delete().to(unenroll)),
    )
    .service(
        web::resource("/{course_id}/enrollments")
            .route(web::get().to(list_roster))
            .wrap(middlewares::RequireCourseAccess::staff()),
    )
    .service(
        web::resource("/{course_id}/enrollments/export")
            .route(web::get().to(export_roster))
            .wrap(middlewares::RequireCourseAccess::staff()),
    );
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_my_enrollments)),
    );
}
