use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::quizzes::requests::{CreateQuizRequest, SubmitAttemptRequest, UpdateQuizRequest};
use crate::services::QuizService;
use crate::utils::SafeQuizIdI64;

// 懒加载的全局 QuizService 实例
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn list_quizzes(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req).await
}

pub async fn create_quiz(
    req: HttpRequest,
    body: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, body.into_inner()).await
}

// 学员视角不含正确答案
pub async fn get_quiz(req: HttpRequest, path: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, path.0).await
}

pub async fn update_quiz(
    req: HttpRequest,
    path: SafeQuizIdI64,
    body: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .update_quiz(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_quiz(req: HttpRequest, path: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, path.0).await
}

// 提交测验作答
pub async fn submit_attempt(
    req: HttpRequest,
    path: SafeQuizIdI64,
    body: web::Json<SubmitAttemptRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_attempt(&req, path.0, body.into_inner())
        .await
}

pub async fn list_attempts(req: HttpRequest, path: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_attempts(&req, path.0).await
}

// 挂载在 /api/v1/courses 作用域下
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/quizzes")
            .route(
                web::get()
                    .to(list_quizzes)
                    .wrap(middlewares::RequireCourseAccess::any()),
            )
            .route(
                web::post()
                    .to(create_quiz)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    .service(
        web::resource("/{course_id}/quizzes/{quiz_id}")
            .route(
                web::get()
                    .to(get_quiz)
                    .wrap(middlewares::RequireCourseAccess::any()),
            )
            .route(
                web::put()
                    .to(update_quiz)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            )
            .route(
                web::delete()
                    .to(delete_quiz)
                    .wrap(middlewares::RequireCourseAccess::staff()),
            ),
    )
    // 作答须已选课，查看时管理者可见全部记录
    .service(
        web::resource("/{course_id}/quizzes/{quiz_id}/attempts")
            .route(web::post().to(submit_attempt))
            .route(web::get().to(list_attempts))
            .wrap(middlewares::RequireCourseAccess::any()),
    );
}
