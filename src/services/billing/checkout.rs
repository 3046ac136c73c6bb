use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::BillingService;
use crate::models::{
    ApiResponse, ErrorCode,
    billing::requests::CheckoutRequest,
    common::response::{internal_error, storage_error_response},
};
use crate::services::current_user;

pub async fn checkout(
    service: &BillingService,
    request: &HttpRequest,
    checkout_data: CheckoutRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let course = match storage.get_course_by_id(checkout_data.course_id).await {
        Ok(Some(course)) if course.is_published() => course,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load course", e)),
    };

    if course.is_free() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseIsFree,
            "This course is free, enroll directly",
        )));
    }

    match storage.get_enrollment(user.id, course.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Already enrolled in this course",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check enrollment", e)),
    }

    match storage.create_or_reuse_payment(user.id, &course).await {
        Ok(payment) => {
            info!(
                "Checkout for user {} on course {}: payment {} ({} {})",
                user.id, course.id, payment.id, payment.amount_cents, payment.currency
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(payment, "Checkout created")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::PaymentStatusInvalid)),
    }
}
