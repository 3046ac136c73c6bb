use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CreateLessonRequest, ReorderRequest, UpdateLessonRequest};
use crate::services::LessonService;
use crate::utils::{SafeCourseIdI64, SafeLessonIdI64, SafeModuleIdI64};

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

pub async fn list_lessons(req: HttpRequest, path: SafeModuleIdI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, path.0).await
}

pub async fn create_lesson(
    req: HttpRequest,
    path: SafeModuleIdI64,
    body: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(&req, path.0, body.into_inner())
        .await
}

pub async fn reorder_lessons(
    req: HttpRequest,
    path: SafeModuleIdI64,
    body: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .reorder_lessons(&req, path.0, body.into_inner())
        .await
}

// 试看课时无需课程访问权限，业务层判断
pub async fn get_lesson(
    req: HttpRequest,
    course: SafeCourseIdI64,
    lesson: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(&req, course.0, lesson.0).await
}

pub async fn update_lesson(
    req: HttpRequest,
    path: SafeLessonIdI64,
    body: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_lesson(req: HttpRequest, path: SafeLessonIdI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, path.0).await
}

// 标记课时完成
pub async fn complete_lesson(
    req: HttpRequest,
    path: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.complete_lesson(&req, path.0).await
}

// 获取学习进度
pub async fn get_progress(req: HttpRequest) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_progress(&req).await
}

// 挂载在 /api/v1/courses 作用域下
pub fn configure_lesson_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/modules/{module_id}/lessons")
            .route(
                web::get()
                    .to(list_lessons)
                    .wrap(middlewares::RequireCourseAccess::any()),
            )
            .route(
                web::post()
                    .to(create_lesson)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    .service(
        web::resource("/{course_id}/modules/{module_id}/lessons/reorder")
            .route(web::put().to(reorder_lessons))
            .wrap(middlewares::RequireCourseAccess::staff()),
    )
    .service(
        web::resource("/{course_id}/lessons/{lesson_id}")
            .route(web::get().to(get_lesson))
            .route(
                web::put()
                    .to(update_lesson)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            )
            .route(
                web::delete()
                    .to(delete_lesson)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    // 是否已选课由业务层判断
    .service(
        web::resource("/{course_id}/lessons/{lesson_id}/complete")
            .route(web::post().to(complete_lesson))
            .wrap(middlewares::RequireCourseAccess::any()),
    )
    .service(
        web::resource("/{course_id}/progress")
            .route(web::get().to(get_progress))
            .wrap(middlewares::RequireCourseAccess::any()),
    );
}
