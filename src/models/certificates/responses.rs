use serde::Serialize;

use super::entities::Certificate;

#[derive(Debug, Serialize)]
pub struct CertificateListResponse {
    pub items: Vec<Certificate>,
}
