use tokio::sync::oneshot;

use crate::checkout::CheckoutOutcome;
use crate::domain::{CartItem, CheckoutForm};
use crate::error::{CartError, CheckoutError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes
/// parameters and a oneshot channel for responses.

#[derive(Debug)]
pub enum CartRequest {
    /// Add a configured product; quantities merge when the item id is
    /// already present.
    Add {
        item: CartItem,
        respond_to: ServiceResponse<(), CartError>,
    },
    IncrementQuantity {
        item_id: u64,
        respond_to: ServiceResponse<CartItem, CartError>,
    },
    /// Refused when the quantity is 1; removal happens via `Remove`
    /// after the UI's confirmation step.
    DecrementQuantity {
        item_id: u64,
        respond_to: ServiceResponse<CartItem, CartError>,
    },
    Remove {
        item_id: u64,
        respond_to: ServiceResponse<(), CartError>,
    },
    Items {
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    Total {
        respond_to: ServiceResponse<f64, CartError>,
    },
    Clear {
        respond_to: ServiceResponse<(), CartError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum CheckoutRequest {
    Submit {
        form: CheckoutForm,
        items: Vec<CartItem>,
        respond_to: ServiceResponse<CheckoutOutcome, CheckoutError>,
    },
    /// Internal: the in-flight attempt finished (either way); clears
    /// the guard so the next user-initiated submit can start.
    Completed,
    Shutdown,
}
