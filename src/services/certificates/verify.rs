use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::CertificateService;
use crate::cache::ResourceKind;
use crate::models::{
    ApiResponse, ErrorCode,
    certificates::{entities::CertificateVerification, responses::CertificateListResponse},
    common::response::internal_error,
};
use crate::services::{current_user, resource_cache};

pub async fn list_my_certificates(
    service: &CertificateService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.list_user_certificates(user.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CertificateListResponse { items },
            "Certificate list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list certificates", e)),
    }
}

pub async fn verify_certificate(
    service: &CertificateService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = resource_cache(request);

    if let Some(cache) = &cache
        && let Some(verification) = cache
            .get::<CertificateVerification>(ResourceKind::Certificate, &code)
            .await
    {
        debug!("Certificate verification served from cache");
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            verification,
            "Certificate is valid",
        )));
    }

    match storage.get_certificate_verification(&code).await {
        Ok(Some(verification)) => {
            if let Some(cache) = &cache {
                cache.set(ResourceKind::Certificate, &code, &verification).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                verification,
                "Certificate is valid",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CertificateNotFound,
            "Certificate not found",
        ))),
        Err(e) => Ok(internal_error("Failed to verify certificate", e)),
    }
}
