use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{assignments, certificates, enrollments, forums, lessons, modules, quizzes};
use crate::middlewares;
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// 列出课程
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

// 创建课程
pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, body.into_inner()).await
}

// 获取课程详情及大纲
pub async fn get_course(req: HttpRequest, path: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.0).await
}

// 更新课程
pub async fn update_course(
    req: HttpRequest,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.update_course(&req, body.into_inner()).await
}

// 删除课程
pub async fn delete_course(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req).await
}

fn configure_course_core(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            // 已发布课程对所有登录用户可见，mine=true 时按角色返回自己的课程
            .route(web::get().to(list_courses))
            // 讲师创建自己的课程，管理员可以指定讲师
            .route(
                web::post()
                    .to(create_course)
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
            ),
    )
    .service(
        web::resource("/{course_id}")
            // 草稿课程仅课程管理者可见，业务层判断
            .route(web::get().to(get_course))
            .route(
                web::put()
                    .to(update_course)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            )
            .route(
                web::delete()
                    .to(delete_course)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    );
}

// 配置路由
//
// 课程下的全部资源共用一个作用域，子模块只注册相对路径
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .configure(configure_course_core)
            .configure(enrollments::configure_course_enrollment_routes)
            .configure(modules::configure_module_routes)
            .configure(lessons::configure_lesson_routes)
            .configure(quizzes::configure_quiz_routes)
            .configure(assignments::configure_assignment_routes)
            .configure(forums::configure_forum_routes)
            .configure(certificates::configure_course_certificate_routes),
    );
}
