//! Payment authorization seam and the simulated Czech gateways behind it.

pub mod error;
mod stub;

pub use error::*;
pub use stub::*;

use std::future::Future;

use crate::domain::OrderDraft;

/// Outcome of one authorization attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResult {
    pub success: bool,
    /// Present only when the authorization succeeded; minted fresh for
    /// every attempt, never reused across retries.
    pub transaction_id: Option<String>,
    pub method: String,
    pub message: String,
}

/// Contract between checkout and whatever moves the money.
///
/// Declines are data (`success == false` with a user-facing message);
/// `Err` is reserved for requests the gateway cannot even attempt.
/// The stub stands behind this seam until a real integration replaces it.
pub trait PaymentGateway: Send + Sync + 'static {
    fn authorize(
        &self,
        method: &str,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<PaymentResult, PaymentError>> + Send;
}
