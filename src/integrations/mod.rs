//! 外部服务集成
//!
//! - `credentials`: 证书签发（外部凭证 API 或本地签发）
//! - `mailer`: 邮件发送（SMTP 或仅记录日志）

pub mod credentials;
pub mod mailer;

pub use credentials::{
    CredentialIssuer, CredentialRequest, HttpCredentialIssuer, IssuedCredential,
    LocalCredentialIssuer, build_credential_issuer,
};
pub use mailer::{LogMailer, MailMessage, Mailer, SmtpMailer, build_mailer};
