use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::errors::CourseHubError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// 将存储层错误映射为 HTTP 响应
///
/// 业务校验类错误使用调用方给出的错误码，其余一律按 500 处理并记录日志。
pub fn storage_error_response(err: &CourseHubError, code: ErrorCode) -> HttpResponse {
    match err {
        CourseHubError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg.clone()))
        }
        CourseHubError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(code, msg.clone()))
        }
        CourseHubError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(code, msg.clone()))
        }
        CourseHubError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(code, msg.clone()))
        }
        CourseHubError::ExternalService(msg) => {
            tracing::error!("External service failure: {}", msg);
            HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::ExternalServiceError,
                msg.clone(),
            ))
        }
        _ if err.is_unique_violation() => HttpResponse::Conflict().json(
            ApiResponse::error_empty(code, "Resource already exists"),
        ),
        _ => {
            tracing::error!("Storage operation failed: {}", err);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ))
        }
    }
}

/// 通用 500 响应
pub fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        context.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(42, "ok");
        assert_eq!(resp.code, 0);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["data"], 42);
        assert_eq!(json["message"], "ok");
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let resp = ApiResponse::error_empty(ErrorCode::CourseNotFound, "Course not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 3000);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_storage_error_status_mapping() {
        let cases = [
            (CourseHubError::validation("x"), StatusCode::BAD_REQUEST),
            (CourseHubError::not_found("x"), StatusCode::NOT_FOUND),
            (CourseHubError::conflict("x"), StatusCode::CONFLICT),
            (CourseHubError::authorization("x"), StatusCode::FORBIDDEN),
            (CourseHubError::external_service("x"), StatusCode::BAD_GATEWAY),
            (
                CourseHubError::database_operation("UNIQUE constraint failed: courses.slug"),
                StatusCode::CONFLICT,
            ),
            (
                CourseHubError::database_operation("disk I/O error"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let resp = storage_error_response(&err, ErrorCode::BadRequest);
            assert_eq!(resp.status(), status, "{err}");
        }
    }
}
