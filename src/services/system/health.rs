use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::warn;

use super::SystemService;
use crate::models::{
    ApiResponse, AppStartTime, ErrorCode,
    system::responses::HealthResponse,
};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let database = match storage.ping().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            false
        }
    };

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.uptime_seconds())
        .unwrap_or_default();

    let response = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        system_name: service.get_config().app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        database,
    };

    if database {
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            ErrorCode::InternalServerError,
            response,
            "Database is unreachable",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_never_negative() {
        let future = AppStartTime {
            start_datetime: chrono::Utc::now() + chrono::Duration::hours(1),
        };
        assert_eq!(future.uptime_seconds(), 0);
        assert!(AppStartTime::now().uptime_seconds() < 5);
    }
}
