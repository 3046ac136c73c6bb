use serde::Deserialize;

// 颁发证书请求；省略 user_id 时为本人申请
#[derive(Debug, Default, Deserialize)]
pub struct IssueCertificateRequest {
    pub user_id: Option<i64>,
}
