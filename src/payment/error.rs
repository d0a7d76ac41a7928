use thiserror::Error;

/// Errors that can occur before an authorization attempt even runs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("unsupported payment method: {0}")]
    UnsupportedMethod(String),
}
