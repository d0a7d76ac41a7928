//! Checkout orchestration: validate → authorize → persist → notify.

mod service;
pub mod validator;

pub use service::*;
pub use validator::validate;

use crate::domain::{OrderRecord, ValidationErrors};

/// UI-facing result of one submit attempt.
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// Field errors; the form re-renders inline and nothing else ran.
    Rejected(ValidationErrors),
    /// The gateway declined or refused the payment. Cart and form
    /// survive untouched for another attempt.
    PaymentDeclined { message: String },
    /// Payment went through but the order row could not be written.
    PersistenceFailed,
    /// The order is durable and the cart has been cleared.
    Placed(OrderRecord),
}
