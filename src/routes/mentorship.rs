use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::mentorship::requests::{
    CreateMentorshipRequest, CreateSessionRequest, MentorListParams, RespondMentorshipRequest,
    UpdateSessionRequest, UpsertMentorProfileRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::MentorshipService;
use crate::utils::{SafeProfileIdI64, SafeRequestIdI64, SafeSessionIdI64};

// 懒加载的全局 MentorshipService 实例
static MENTORSHIP_SERVICE: Lazy<MentorshipService> = Lazy::new(MentorshipService::new_lazy);

// 列出接受指导的导师
pub async fn list_mentors(
    req: HttpRequest,
    query: web::Query<MentorListParams>,
) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE
        .list_mentors(&req, query.into_inner())
        .await
}

pub async fn get_mentor(req: HttpRequest, path: SafeProfileIdI64) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE.get_mentor(&req, path.0).await
}

// 导师维护自己的资料
pub async fn upsert_my_profile(
    req: HttpRequest,
    body: web::Json<UpsertMentorProfileRequest>,
) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE
        .upsert_my_profile(&req, body.into_inner())
        .await
}

// 学员发起指导申请
pub async fn create_request(
    req: HttpRequest,
    path: SafeProfileIdI64,
    body: web::Json<CreateMentorshipRequest>,
) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE
        .create_request(&req, path.0, body.into_inner())
        .await
}

pub async fn list_requests(req: HttpRequest) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE.list_requests(&req).await
}

// 导师接受或拒绝申请
pub async fn respond_request(
    req: HttpRequest,
    path: SafeRequestIdI64,
    body: web::Json<RespondMentorshipRequest>,
) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE
        .respond_request(&req, path.0, body.into_inner())
        .await
}

// 预约指导时段
pub async fn create_session(
    req: HttpRequest,
    path: SafeRequestIdI64,
    body: web::Json<CreateSessionRequest>,
) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE
        .create_session(&req, path.0, body.into_inner())
        .await
}

pub async fn list_sessions(req: HttpRequest) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE.list_sessions(&req).await
}

pub async fn update_session(
    req: HttpRequest,
    path: SafeSessionIdI64,
    body: web::Json<UpdateSessionRequest>,
) -> ActixResult<HttpResponse> {
    MENTORSHIP_SERVICE
        .update_session(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_mentorship_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/mentors")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_mentors))
            // 须在 /{profile_id} 之前注册
            .service(
                web::resource("/me").route(
                    web::put()
                        .to(upsert_my_profile)
                        .wrap(middlewares::RequireRole::new_any(UserRole::mentor_roles())),
                ),
            )
            .route("/{profile_id}", web::get().to(get_mentor))
            .service(
                web::resource("/{profile_id}/requests").route(
                    web::post()
                        .to(create_request)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            ),
    );

    // 申请与预约的当事人校验由业务层完成
    cfg.service(
        web::scope("/api/v1/mentorship")
            .wrap(middlewares::RequireJWT)
            .route("/requests", web::get().to(list_requests))
            .route("/requests/{request_id}", web::put().to(respond_request))
            .route(
                "/requests/{request_id}/sessions",
                web::post().to(create_session),
            )
            .route("/sessions", web::get().to(list_sessions))
            .route("/sessions/{session_id}", web::put().to(update_session)),
    );
}
