//! Outbound mail
//!
//! `Mailer` is the seam between the report service and whatever actually
//! delivers email. Production uses [`SmtpMailer`]; tests plug in fakes.

mod smtp_mailer;

pub use smtp_mailer::SmtpMailer;

use async_trait::async_trait;
use thiserror::Error;

/// A fully rendered HTML email addressed to a single recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Delivers a single email. One attempt per call, no retries.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}
