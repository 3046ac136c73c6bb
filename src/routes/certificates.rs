use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::certificates::requests::IssueCertificateRequest;
use crate::services::CertificateService;
use crate::utils::SafeVerificationCode;

// 懒加载的全局 CertificateService 实例
static CERTIFICATE_SERVICE: Lazy<CertificateService> = Lazy::new(CertificateService::new_lazy);

// 颁发证书，本人申请时请求体可省略
pub async fn issue_certificate(
    req: HttpRequest,
    body: Option<web::Json<IssueCertificateRequest>>,
) -> ActixResult<HttpResponse> {
    let issue_data = body.map(web::Json::into_inner).unwrap_or_default();
    CERTIFICATE_SERVICE
        .issue_certificate(&req, issue_data)
        .await
}

pub async fn list_my_certificates(req: HttpRequest) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE.list_my_certificates(&req).await
}

// 公开校验证书
pub async fn verify_certificate(
    req: HttpRequest,
    code: SafeVerificationCode,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE.verify_certificate(&req, code.0).await
}

// 挂载在 /api/v1/courses 作用域下
pub fn configure_course_certificate_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{course_id}/certificates")
            .route(web::post().to(issue_certificate))
            .wrap(middlewares::RequireCourseAccess::any()),
    );
}

// 配置路由
pub fn configure_certificate_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/certificates")
            // 校验接口无需登录
            .service(
                web::resource("/verify/{code}")
                    .route(web::get().to(verify_certificate))
                    .wrap(middlewares::RateLimit::certificate_verify()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("", web::get().to(list_my_certificates)),
            ),
    );
}
