//! 证书签发集成

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::CredentialsConfig;
use crate::errors::{CourseHubError, Result};

/// 签发请求
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRequest {
    pub issuer_name: String,
    pub recipient_name: String,
    pub recipient_email: String,
    pub course_id: i64,
    pub course_title: String,
    pub completed_at: DateTime<Utc>,
}

/// 签发结果
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssuedCredential {
    #[serde(alias = "id")]
    pub credential_id: String,
    #[serde(default)]
    pub verification_url: Option<String>,
}

#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    async fn issue(&self, request: &CredentialRequest) -> Result<IssuedCredential>;

    fn name(&self) -> &'static str;
}

/// 调用外部凭证 API
pub struct HttpCredentialIssuer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpCredentialIssuer {
    pub fn new(config: &CredentialsConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CourseHubError::validation(
                "credentials.base_url must be set when credentials are enabled",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| {
                CourseHubError::external_service(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: credentials_endpoint(&config.base_url),
            api_key: config.api_key.clone(),
        })
    }
}

fn credentials_endpoint(base_url: &str) -> String {
    format!("{}/credentials", base_url.trim_end_matches('/'))
}

#[async_trait]
impl CredentialIssuer for HttpCredentialIssuer {
    async fn issue(&self, request: &CredentialRequest) -> Result<IssuedCredential> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Credential API request failed: {}", e);
            CourseHubError::external_service(format!("Credential API unreachable: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Credential API returned {}: {}", status, body);
            return Err(CourseHubError::external_service(format!(
                "Credential API returned status {status}"
            )));
        }

        let issued = response.json::<IssuedCredential>().await.map_err(|e| {
            CourseHubError::external_service(format!("Invalid credential API response: {e}"))
        })?;

        if issued.credential_id.trim().is_empty() {
            return Err(CourseHubError::external_service(
                "Credential API returned an empty credential id",
            ));
        }

        Ok(issued)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// 本地签发，未接入凭证服务时使用
pub struct LocalCredentialIssuer;

#[async_trait]
impl CredentialIssuer for LocalCredentialIssuer {
    async fn issue(&self, _request: &CredentialRequest) -> Result<IssuedCredential> {
        Ok(IssuedCredential {
            credential_id: format!("local-{}", uuid::Uuid::new_v4()),
            verification_url: None,
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

pub fn build_credential_issuer(config: &CredentialsConfig) -> Result<Arc<dyn CredentialIssuer>> {
    if config.enabled {
        let issuer = HttpCredentialIssuer::new(config)?;
        info!("Credential issuer: {}", issuer.endpoint);
        Ok(Arc::new(issuer))
    } else {
        info!("Credential issuer disabled, certificates are issued locally");
        Ok(Arc::new(LocalCredentialIssuer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, base_url: &str) -> CredentialsConfig {
        CredentialsConfig {
            enabled,
            base_url: base_url.to_string(),
            api_key: String::new(),
            issuer_name: "CourseHub".to_string(),
            timeout_secs: 1,
        }
    }

    fn request() -> CredentialRequest {
        CredentialRequest {
            issuer_name: "CourseHub".into(),
            recipient_name: "Alice".into(),
            recipient_email: "alice@example.com".into(),
            course_id: 1,
            course_title: "Rust".into(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        assert_eq!(
            credentials_endpoint("https://creds.example.com/api/"),
            "https://creds.example.com/api/credentials"
        );
    }

    #[test]
    fn test_response_accepts_id_alias() {
        let issued: IssuedCredential =
            serde_json::from_str(r#"{"id":"abc","verification_url":"https://v/abc"}"#).unwrap();
        assert_eq!(issued.credential_id, "abc");
        assert_eq!(issued.verification_url.as_deref(), Some("https://v/abc"));
    }

    #[test]
    fn test_enabled_without_base_url_is_rejected() {
        assert!(build_credential_issuer(&config(true, " ")).is_err());
        assert_eq!(
            build_credential_issuer(&config(false, "")).unwrap().name(),
            "local"
        );
    }

    #[tokio::test]
    async fn test_local_issuer_generates_unique_ids() {
        let a = LocalCredentialIssuer.issue(&request()).await.unwrap();
        let b = LocalCredentialIssuer.issue(&request()).await.unwrap();
        assert!(a.credential_id.starts_with("local-"));
        assert_ne!(a.credential_id, b.credential_id);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_external_error() {
        let issuer = HttpCredentialIssuer::new(&config(true, "http://127.0.0.1:9")).unwrap();
        let err = issuer.issue(&request()).await.unwrap_err();
        assert!(matches!(err, CourseHubError::ExternalService(_)));
    }
}
