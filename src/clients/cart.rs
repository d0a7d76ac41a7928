use tokio::sync::mpsc;

use crate::client_method;
use crate::domain::CartItem;
use crate::error::CartError;
use crate::messages::CartRequest;

/// Client for the cart actor.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Stops the cart actor. Best effort; the channel may already be
    /// closed during teardown.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(CartRequest::Shutdown).await;
    }
}

client_method!(CartClient => fn add(item: CartItem) -> () as CartRequest::Add, Error = CartError);
client_method!(CartClient => fn increment_quantity(item_id: u64) -> CartItem as CartRequest::IncrementQuantity, Error = CartError);
client_method!(CartClient => fn decrement_quantity(item_id: u64) -> CartItem as CartRequest::DecrementQuantity, Error = CartError);
client_method!(CartClient => fn remove(item_id: u64) -> () as CartRequest::Remove, Error = CartError);
client_method!(CartClient => fn items() -> Vec<CartItem> as CartRequest::Items, Error = CartError);
client_method!(CartClient => fn total() -> f64 as CartRequest::Total, Error = CartError);
client_method!(CartClient => fn clear() -> () as CartRequest::Clear, Error = CartError);
