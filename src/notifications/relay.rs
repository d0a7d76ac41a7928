use std::future::Future;

use serde::Serialize;
use tracing::info;

use super::error::RelayError;

/// Default MailerSend endpoint; overridable for tests and sandboxes.
pub const MAILERSEND_ENDPOINT: &str = "https://api.mailersend.com/v1/email";

#[derive(Debug, Clone, Serialize)]
pub struct EmailParty {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One outgoing message in the relay's wire shape. The plain-text twin
/// is mandatory alongside the HTML body.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: EmailParty,
    pub to: Vec<EmailParty>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Receipt for a message the relay accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReceipt {
    pub message_id: Option<String>,
}

/// The external transactional-email sending service.
pub trait EmailRelay: Send + Sync + 'static {
    fn send(
        &self,
        message: &EmailMessage,
    ) -> impl Future<Output = Result<RelayReceipt, RelayError>> + Send;
}

/// Relay backed by the MailerSend HTTP API.
pub struct MailerSendRelay {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl MailerSendRelay {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, MAILERSEND_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl EmailRelay for MailerSendRelay {
    async fn send(&self, message: &EmailMessage) -> Result<RelayReceipt, RelayError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let message_id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message_id")
                    .and_then(|id| id.as_str())
                    .map(str::to_string)
            });

        Ok(RelayReceipt { message_id })
    }
}

/// Stands in when MailerSend credentials are absent: the message is
/// logged, nothing leaves the process.
#[derive(Debug, Default, Clone)]
pub struct LoggingRelay;

impl EmailRelay for LoggingRelay {
    async fn send(&self, message: &EmailMessage) -> Result<RelayReceipt, RelayError> {
        let to = message
            .to
            .first()
            .map_or("-", |party| party.email.as_str());
        info!(
            to = %to,
            subject = %message.subject,
            "email relay not configured; logging message only"
        );
        Ok(RelayReceipt { message_id: None })
    }
}

/// Relay selected at startup from the environment.
pub enum RelayKind {
    MailerSend(MailerSendRelay),
    Logging(LoggingRelay),
}

impl EmailRelay for RelayKind {
    async fn send(&self, message: &EmailMessage) -> Result<RelayReceipt, RelayError> {
        match self {
            Self::MailerSend(relay) => relay.send(message).await,
            Self::Logging(relay) => relay.send(message).await,
        }
    }
}
