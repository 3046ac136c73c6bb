//! 路径参数安全提取器
//!
//! 路径中的 ID 解析失败时直接返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{param}': {raw}"),
            ));
            Err(InternalError::from_response(format!("invalid {param}"), response).into())
        }
    }
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeUserIdI64 => "user_id",
    SafeCourseIdI64 => "course_id",
    SafeModuleIdI64 => "module_id",
    SafeLessonIdI64 => "lesson_id",
    SafeQuizIdI64 => "quiz_id",
    SafeAssignmentIdI64 => "assignment_id",
    SafeSubmissionIdI64 => "submission_id",
    SafeThreadIdI64 => "thread_id",
    SafePostIdI64 => "post_id",
    SafeProfileIdI64 => "profile_id",
    SafeRequestIdI64 => "request_id",
    SafeSessionIdI64 => "session_id",
    SafePaymentIdI64 => "payment_id",
    SafeNotificationIdI64 => "notification_id",
}

/// 证书校验码（仅允许大写字母与数字）
#[derive(Debug, Clone)]
pub struct SafeVerificationCode(pub String);

impl FromRequest for SafeVerificationCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("code").unwrap_or_default();
        let normalized = raw.trim().to_ascii_uppercase();
        if !normalized.is_empty()
            && normalized.len() <= 64
            && normalized.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return ready(Ok(SafeVerificationCode(normalized)));
        }
        let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Invalid verification code",
        ));
        ready(Err(
            InternalError::from_response("invalid verification code", response).into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let (req, mut pl) = TestRequest::default()
            .param("course_id", "42")
            .to_http_parts();
        let id = SafeCourseIdI64::from_request(&req, &mut pl).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_invalid_ids_are_rejected() {
        for raw in ["abc", "0", "-3", ""] {
            let (req, mut pl) = TestRequest::default().param("user_id", raw).to_http_parts();
            let err = SafeUserIdI64::from_request(&req, &mut pl).await.unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST
            );
        }
    }

    #[actix_web::test]
    async fn test_verification_code_is_normalized() {
        let (req, mut pl) = TestRequest::default().param("code", "ab12cd").to_http_parts();
        let code = SafeVerificationCode::from_request(&req, &mut pl).await.unwrap();
        assert_eq!(code.0, "AB12CD");

        let (req, mut pl) = TestRequest::default().param("code", "a b").to_http_parts();
        assert!(SafeVerificationCode::from_request(&req, &mut pl).await.is_err());
    }
}
