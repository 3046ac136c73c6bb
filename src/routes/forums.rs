use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::common::PaginationQuery;
use crate::models::forums::requests::{
    CreatePostRequest, CreateThreadRequest, ThreadListParams, UpdateThreadRequest,
};
use crate::services::ForumService;
use crate::utils::{SafePostIdI64, SafeThreadIdI64};

// 懒加载的全局 ForumService 实例
static FORUM_SERVICE: Lazy<ForumService> = Lazy::new(ForumService::new_lazy);

// 列出讨论帖，置顶优先
pub async fn list_threads(
    req: HttpRequest,
    query: web::Query<ThreadListParams>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.list_threads(&req, query.into_inner()).await
}

pub async fn create_thread(
    req: HttpRequest,
    body: web::Json<CreateThreadRequest>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.create_thread(&req, body.into_inner()).await
}

// 讨论帖及分页回复
pub async fn get_thread(
    req: HttpRequest,
    path: SafeThreadIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE
        .get_thread(&req, path.0, query.into_inner())
        .await
}

pub async fn update_thread(
    req: HttpRequest,
    path: SafeThreadIdI64,
    body: web::Json<UpdateThreadRequest>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE
        .update_thread(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_thread(req: HttpRequest, path: SafeThreadIdI64) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.delete_thread(&req, path.0).await
}

// 回复讨论帖
pub async fn create_post(
    req: HttpRequest,
    path: SafeThreadIdI64,
    body: web::Json<CreatePostRequest>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE
        .create_post(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_post(
    req: HttpRequest,
    thread: SafeThreadIdI64,
    post: SafePostIdI64,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.delete_post(&req, thread.0, post.0).await
}

// 挂载在 /api/v1/courses 作用域下，作者与管理者的区分由业务层判断
pub fn configure_forum_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/threads")
            .route(web::get().to(list_threads))
            .route(web::post().to(create_thread))
            .wrap(middlewares::RequireCourseAccess::any()),
    )
    .service(
        web::resource("/{course_id}/threads/{thread_id}")
            .route(web::get().to(get_thread))
            .route(web::put().to(update_thread))
            .route(web::delete().to(delete_thread))
            .wrap(middlewares::RequireCourseAccess::any()),
    )
    .service(
        web::resource("/{course_id}/threads/{thread_id}/posts")
            .route(web::post().to(create_post))
            .wrap(middlewares::RequireCourseAccess::any()),
    )
    .service(
        web::resource("/{course_id}/threads/{thread_id}/posts/{post_id}")
            .route(web::delete().to(delete_post))
            .wrap(middlewares::RequireCourseAccess::any()),
    );
}
