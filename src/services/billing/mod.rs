pub mod checkout;
pub mod payments;
pub mod webhook;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::billing::requests::{CheckoutRequest, PaymentListParams};

storage_service!(BillingService);

impl BillingService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    /// 为付费课程创建（或复用）待支付订单
    pub async fn checkout(
        &self,
        request: &HttpRequest,
        checkout_data: CheckoutRequest,
    ) -> ActixResult<HttpResponse> {
        checkout::checkout(self, request, checkout_data).await
    }

    /// 支付回调，无需登录，凭签名认证
    pub async fn handle_webhook(
        &self,
        request: &HttpRequest,
        body: web::Bytes,
    ) -> ActixResult<HttpResponse> {
        webhook::handle_webhook(self, request, body).await
    }

    pub async fn list_payments(
        &self,
        request: &HttpRequest,
        params: PaymentListParams,
    ) -> ActixResult<HttpResponse> {
        payments::list_payments(self, request, params).await
    }

    pub async fn export_payments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        payments::export_payments(self, request).await
    }

    pub async fn refund_payment(
        &self,
        request: &HttpRequest,
        payment_id: i64,
    ) -> ActixResult<HttpResponse> {
        payments::refund_payment(self, request, payment_id).await
    }
}
