use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("cart item not found: {0}")]
    ItemNotFound(u64),
    #[error("quantity of item {0} would drop to zero; removal must be explicit")]
    WouldRemoveItem(u64),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("order database error: {0}")]
    DatabaseError(String),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog database error: {0}")]
    DatabaseError(String),
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("a checkout attempt is already in flight")]
    CheckoutInProgress,
    #[error("cannot check out an empty cart")]
    EmptyCart,
    #[error("actor communication error: {0}")]
    ActorCommunicationError(String),
}
