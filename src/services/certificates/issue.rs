use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{CertificateService, VERIFICATION_CODE_LEN};
use crate::integrations::{CredentialIssuer, CredentialRequest, MailMessage, Mailer};
use crate::middlewares::CourseAccess;
use crate::models::{
    ApiResponse, ErrorCode,
    certificates::{entities::NewCertificate, requests::IssueCertificateRequest},
    common::response::{internal_error, storage_error_response},
};
use crate::services::{course_context, current_user};
use crate::utils::random_code::generate_verification_code;

fn bad_request(code: ErrorCode, msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg))
}

pub async fn issue_certificate(
    service: &CertificateService,
    request: &HttpRequest,
    issue_data: IssueCertificateRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (course, access) = course_context(request)?;

    // 1. 确定证书获得者：本人申请需已选课，代发需课程管理者
    let target_id = issue_data.user_id.unwrap_or(user.id);
    let for_self = target_id == user.id;
    if for_self && access != CourseAccess::Enrolled {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "Only enrolled students can request a certificate",
        )));
    }
    if !for_self && !access.is_staff() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Only course staff can issue certificates for other users",
        )));
    }

    let recipient = match storage.get_user_by_id(target_id).await {
        Ok(Some(recipient)) => recipient,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load user", e)),
    };

    let enrollment = match storage.get_enrollment(recipient.id, course.id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(bad_request(
                ErrorCode::NotEnrolled,
                "User is not enrolled in this course",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to load enrollment", e)),
    };

    // 2. 重复颁发
    match storage.get_certificate_for(recipient.id, course.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CertificateAlreadyIssued,
                "Certificate has already been issued for this course",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check certificate", e)),
    }

    // 3. 结业条件，管理者代发时跳过
    if for_self {
        match storage.get_course_completion(recipient.id, course.id).await {
            Ok(completion) if completion.is_complete() => {}
            Ok(completion) => {
                return Ok(bad_request(
                    ErrorCode::CourseNotCompleted,
                    format!("Course not completed: {}", completion.missing_summary()),
                ));
            }
            Err(e) => return Ok(internal_error("Failed to check course completion", e)),
        }
    }

    // 4. 外部签发，失败时不落库
    let Some(issuer) = request
        .app_data::<web::Data<Arc<dyn CredentialIssuer>>>()
        .map(|i| i.get_ref().clone())
    else {
        error!("Credential issuer not registered in app data");
        return Ok(internal_error("Credential issuer unavailable", "missing app data"));
    };

    let credential_request = CredentialRequest {
        issuer_name: service.get_config().credentials.issuer_name.clone(),
        recipient_name: recipient.profile.display_name.clone(),
        recipient_email: recipient.email.clone(),
        course_id: course.id,
        course_title: course.title.clone(),
        completed_at: Utc::now(),
    };
    let issued = match issuer.issue(&credential_request).await {
        Ok(issued) => issued,
        Err(e) => {
            error!(
                "Credential issuer '{}' failed for user {} on course {}: {}",
                issuer.name(),
                recipient.id,
                course.id,
                e
            );
            return Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::CertificateIssueFailed,
                "Credential service failed to issue the certificate",
            )));
        }
    };

    // 5. 落库（同一事务内结课并通知）
    let certificate = match storage
        .issue_certificate(NewCertificate {
            user_id: recipient.id,
            course_id: course.id,
            enrollment_id: enrollment.id,
            credential_id: issued.credential_id,
            verification_url: issued.verification_url,
            verification_code: generate_verification_code(VERIFICATION_CODE_LEN),
        })
        .await
    {
        Ok(certificate) => certificate,
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::CertificateAlreadyIssued)),
    };

    info!(
        "Certificate {} issued to user {} for course {}",
        certificate.id, recipient.id, course.id
    );

    // 6. 邮件通知，失败只记日志
    if let Some(mailer) = request
        .app_data::<web::Data<Arc<dyn Mailer>>>()
        .map(|m| m.get_ref().clone())
    {
        let message = MailMessage::certificate_issued(
            &recipient.email,
            &recipient.profile.display_name,
            &course.title,
            &certificate.verification_code,
        );
        if let Err(e) = mailer.send(message).await {
            warn!("Failed to email certificate to {}: {}", recipient.email, e);
        }
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(certificate, "Certificate issued")))
}
