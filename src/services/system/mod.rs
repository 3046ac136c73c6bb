pub mod health;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;

storage_service!(SystemService);

impl SystemService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    /// 健康检查，无需登录
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::health(self, request).await
    }
}
