//! 邮件发送集成

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::info;

use crate::config::MailConfig;
use crate::errors::{CourseHubError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn certificate_issued(
        to: &str,
        recipient_name: &str,
        course_title: &str,
        verification_code: &str,
    ) -> Self {
        Self {
            to: to.to_string(),
            subject: format!("Your certificate for {course_title}"),
            body: format!(
                "Hello {recipient_name},\n\n\
                 Congratulations on completing \"{course_title}\".\n\
                 Your certificate verification code is {verification_code}.\n"
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<()>;
}

/// SMTP 发送
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| CourseHubError::mail(format!("Invalid from address: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| CourseHubError::mail(format!("Failed to create SMTP transport: {e}")))?
            .port(config.smtp_port);
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| CourseHubError::mail(format!("Invalid recipient address: {e}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| CourseHubError::mail(format!("Failed to build email: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| CourseHubError::mail(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}

/// 仅记录日志，未配置 SMTP 时使用
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        info!(
            "Mail delivery disabled, would send to {}: {}",
            message.to, message.subject
        );
        Ok(())
    }
}

pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>> {
    if config.enabled {
        info!("SMTP mailer: {}:{}", config.smtp_host, config.smtp_port);
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        info!("Mail delivery disabled, using log mailer");
        Ok(Arc::new(LogMailer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(from: &str) -> MailConfig {
        MailConfig {
            enabled: true,
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from: from.to_string(),
        }
    }

    #[test]
    fn test_certificate_message() {
        let msg = MailMessage::certificate_issued("a@example.com", "Alice", "Rust", "ABCD2345");
        assert_eq!(msg.subject, "Your certificate for Rust");
        assert!(msg.body.contains("ABCD2345"));
    }

    #[test]
    fn test_invalid_from_address_is_rejected() {
        assert!(matches!(
            SmtpMailer::new(&config("not an address")),
            Err(CourseHubError::Mail(_))
        ));
    }

    #[tokio::test]
    async fn test_smtp_mailer_builds_and_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(&config("CourseHub <noreply@example.com>")).unwrap();
        let err = mailer
            .send(MailMessage {
                to: "broken".to_string(),
                subject: "s".to_string(),
                body: "b".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CourseHubError::Mail(_)));
    }

    #[tokio::test]
    async fn test_log_mailer_succeeds() {
        let msg = MailMessage::certificate_issued("a@example.com", "Alice", "Rust", "X");
        assert!(LogMailer.send(msg).await.is_ok());
    }
}
