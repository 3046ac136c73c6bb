pub mod issue;
pub mod verify;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::certificates::requests::IssueCertificateRequest;

/// 证书校验码长度
pub const VERIFICATION_CODE_LEN: usize = 12;

storage_service!(CertificateService);

impl CertificateService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    /// 颁发结业证书
    pub async fn issue_certificate(
        &self,
        request: &HttpRequest,
        issue_data: IssueCertificateRequest,
    ) -> ActixResult<HttpResponse> {
        issue::issue_certificate(self, request, issue_data).await
    }

    pub async fn list_my_certificates(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        verify::list_my_certificates(self, request).await
    }

    /// 公开验证
    pub async fn verify_certificate(
        &self,
        request: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        verify::verify_certificate(self, request, code).await
    }
}
