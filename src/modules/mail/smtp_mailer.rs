//! SMTP relay client
//!
//! Sends HTML email through the configured relay using lettre's async
//! transport on the tokio runtime.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use super::{MailError, Mailer, OutgoingEmail};
use crate::core::config::{MailConfig, SmtpSecurity};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from configuration. No connection is opened until
    /// the first send.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let builder = match config.security {
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                    .map_err(|e| MailError::Transport(e.to_string()))?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailError::Transport(e.to_string()))?,
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            }
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(config.timeout));

        if let Some((username, password)) = config.credentials() {
            builder = builder.credentials(Credentials::new(username, password));
        }

        let from = parse_mailbox(&config.from)?;

        info!(
            "SMTP mailer configured: host={}, port={}, security={:?}",
            config.smtp_host, config.smtp_port, config.security
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        debug!("SMTP relay accepted message: code={}", response.code());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn mail_config(from: &str) -> MailConfig {
        MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            smtp_username: None,
            smtp_password: None,
            security: SmtpSecurity::None,
            from: from.to_string(),
            safety_recipient: "seguridad@example.com".to_string(),
            subject_prefix: "Reporte".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_new_accepts_valid_sender() {
        assert!(SmtpMailer::new(&mail_config("no-reply@example.com")).is_ok());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_sender() {
        let result = SmtpMailer::new(&mail_config("not an address"));
        assert!(matches!(result, Err(MailError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn test_send_to_invalid_recipient_fails_before_connecting() {
        let mailer = SmtpMailer::new(&mail_config("no-reply@example.com")).unwrap();

        let result = mailer
            .send(OutgoingEmail {
                to: "nobody".to_string(),
                subject: "Prueba".to_string(),
                html_body: "<p>hola</p>".to_string(),
            })
            .await;

        assert!(matches!(result, Err(MailError::InvalidAddress { .. })));
    }
}
