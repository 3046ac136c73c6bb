use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::BillingService;
use crate::errors::CourseHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    billing::requests::{PaymentListParams, PaymentListQuery},
    common::response::{internal_error, storage_error_response},
    users::entities::UserRole,
};
use crate::services::current_user;
use crate::utils::csv_export::{csv_attachment, to_csv};

pub async fn list_payments(
    service: &BillingService,
    request: &HttpRequest,
    params: PaymentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let query = PaymentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        user_id: (user.role != UserRole::Admin).then_some(user.id),
        status: params.status,
    };

    match storage.list_payments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Payment list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list payments", e)),
    }
}

pub async fn export_payments(
    service: &BillingService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let payments = match storage.list_all_payments().await {
        Ok(payments) => payments,
        Err(e) => return Ok(internal_error("Failed to export payments", e)),
    };

    match to_csv(&payments) {
        Ok(body) => Ok(csv_attachment("payments.csv", body)),
        Err(e) => Ok(internal_error("Failed to export payments", e)),
    }
}

pub async fn refund_payment(
    service: &BillingService,
    request: &HttpRequest,
    payment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.refund_payment(payment_id).await {
        Ok(payment) => {
            info!("Payment {} refunded by admin {}", payment.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(payment, "Payment refunded")))
        }
        Err(e @ CourseHubError::NotFound(_)) => {
            Ok(storage_error_response(&e, ErrorCode::PaymentNotFound))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::PaymentStatusInvalid)),
    }
}
