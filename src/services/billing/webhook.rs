use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::{error, info, warn};

use super::BillingService;
use crate::errors::CourseHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    billing::{entities::PaymentStatus, requests::WebhookEvent, responses::WebhookAck},
    common::response::storage_error_response,
};
use crate::utils::signature::verify_signature;

pub const SIGNATURE_HEADER: &str = "X-Signature";

/// 解析并校验回调事件
fn parse_event(
    secret: &str,
    body: &[u8],
    signature: Option<&str>,
) -> Result<WebhookEvent, (ErrorCode, String)> {
    let Some(signature) = signature else {
        return Err((
            ErrorCode::WebhookSignatureInvalid,
            format!("Missing {SIGNATURE_HEADER} header"),
        ));
    };
    if !verify_signature(secret, body, signature) {
        return Err((
            ErrorCode::WebhookSignatureInvalid,
            "Invalid webhook signature".to_string(),
        ));
    }

    let event: WebhookEvent = serde_json::from_slice(body)
        .map_err(|e| (ErrorCode::BadRequest, format!("Invalid webhook payload: {e}")))?;

    if !matches!(event.status, PaymentStatus::Completed | PaymentStatus::Failed) {
        return Err((
            ErrorCode::PaymentStatusInvalid,
            format!("Unsupported webhook status: {}", event.status),
        ));
    }
    Ok(event)
}

pub async fn handle_webhook(
    service: &BillingService,
    request: &HttpRequest,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let secret = &service.get_config().billing.webhook_secret;

    if secret.is_empty() {
        error!("Payment webhook received but billing.webhook_secret is not configured");
    }

    let signature = request
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let event = match parse_event(secret, &body, signature) {
        Ok(event) => event,
        Err((ErrorCode::WebhookSignatureInvalid, msg)) => {
            warn!("Rejected payment webhook: {}", msg);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::WebhookSignatureInvalid,
                msg,
            )));
        }
        Err((code, msg)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    };

    match storage
        .apply_payment_event(event.payment_id, event.status, event.provider_ref)
        .await
    {
        Ok((payment, enrolled)) => {
            info!(
                "Payment {} -> {} (enrolled: {})",
                payment.id, payment.status, enrolled
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                WebhookAck {
                    payment_id: payment.id,
                    status: payment.status.to_string(),
                    enrolled,
                },
                "Webhook processed",
            )))
        }
        Err(e @ CourseHubError::NotFound(_)) => {
            Ok(storage_error_response(&e, ErrorCode::PaymentNotFound))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::PaymentStatusInvalid)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::signature::sign_payload;

    const SECRET: &str = "whsec_test";

    fn signed(body: &str) -> (Vec<u8>, String) {
        (body.as_bytes().to_vec(), sign_payload(SECRET, body.as_bytes()))
    }

    #[test]
    fn test_valid_event_is_accepted() {
        let (body, sig) = signed(r#"{"payment_id":3,"status":"completed","provider_ref":"ch_1"}"#);
        let event = parse_event(SECRET, &body, Some(&sig)).unwrap();
        assert_eq!(event.payment_id, 3);
        assert_eq!(event.status, PaymentStatus::Completed);
    }

    #[test]
    fn test_bad_or_missing_signature_is_rejected() {
        let (body, _) = signed(r#"{"payment_id":3,"status":"completed"}"#);
        let (code, _) = parse_event(SECRET, &body, None).unwrap_err();
        assert_eq!(code, ErrorCode::WebhookSignatureInvalid);

        let forged = sign_payload("other", &body);
        let (code, _) = parse_event(SECRET, &body, Some(&forged)).unwrap_err();
        assert_eq!(code, ErrorCode::WebhookSignatureInvalid);

        let (code, _) = parse_event("", &body, Some("00")).unwrap_err();
        assert_eq!(code, ErrorCode::WebhookSignatureInvalid);
    }

    #[test]
    fn test_only_terminal_statuses_are_accepted() {
        let (body, sig) = signed(r#"{"payment_id":3,"status":"refunded"}"#);
        let (code, _) = parse_event(SECRET, &body, Some(&sig)).unwrap_err();
        assert_eq!(code, ErrorCode::PaymentStatusInvalid);

        let (body, sig) = signed("not json");
        let (code, _) = parse_event(SECRET, &body, Some(&sig)).unwrap_err();
        assert_eq!(code, ErrorCode::BadRequest);
    }
}
