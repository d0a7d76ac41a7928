use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RelayError {
    #[error("relay transport error: {0}")]
    Transport(String),
    #[error("relay rejected the message: status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Failure to deliver one notification. Swallowed and logged at the
/// dispatcher boundary; never escalated into a checkout failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),
}
