use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::billing::requests::{CheckoutRequest, PaymentListParams};
use crate::models::users::entities::UserRole;
use crate::services::BillingService;
use crate::utils::SafePaymentIdI64;

// 懒加载的全局 BillingService 实例
static BILLING_SERVICE: Lazy<BillingService> = Lazy::new(BillingService::new_lazy);

// 创建或复用待支付订单
pub async fn checkout(
    req: HttpRequest,
    body: web::Json<CheckoutRequest>,
) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.checkout(&req, body.into_inner()).await
}

// 支付回调，签名需基于原始请求体校验
pub async fn handle_webhook(req: HttpRequest, body: web::Bytes) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.handle_webhook(&req, body).await
}

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentListParams>,
) -> ActixResult<HttpResponse> {
    BILLING_SERVICE
        .list_payments(&req, query.into_inner())
        .await
}

pub async fn export_payments(req: HttpRequest) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.export_payments(&req).await
}

pub async fn refund_payment(req: HttpRequest, path: SafePaymentIdI64) -> ActixResult<HttpResponse> {
    BILLING_SERVICE.refund_payment(&req, path.0).await
}

// 配置路由
pub fn configure_billing_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/billing")
            // 回调来自支付服务，无 JWT
            .service(
                web::resource("/webhook")
                    .route(web::post().to(handle_webhook))
                    .wrap(middlewares::RateLimit::webhook()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("/checkout").route(
                            web::post()
                                .to(checkout)
                                .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                        ),
                    )
                    // 普通用户只看到自己的订单
                    .route("/payments", web::get().to(list_payments))
                    .service(
                        web::resource("/payments/export")
                            .route(web::get().to(export_payments))
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .service(
                        web::resource("/payments/{payment_id}/refund")
                            .route(web::post().to(refund_payment))
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
