use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::CartClient;
use crate::domain::CartItem;
use crate::error::CartError;
use crate::messages::{CartRequest, ServiceResponse};

/// Owns the cart items for one session. Quantities never reach zero:
/// a decrement at quantity 1 is refused so the UI can run its explicit
/// remove-with-confirmation flow instead. The whole cart is cleared
/// only after an order has been durably persisted.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    items: Vec<CartItem>,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            items: Vec::new(),
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::Add { item, respond_to } => self.handle_add(item, respond_to),
                CartRequest::IncrementQuantity {
                    item_id,
                    respond_to,
                } => self.handle_increment(item_id, respond_to),
                CartRequest::DecrementQuantity {
                    item_id,
                    respond_to,
                } => self.handle_decrement(item_id, respond_to),
                CartRequest::Remove {
                    item_id,
                    respond_to,
                } => self.handle_remove(item_id, respond_to),
                CartRequest::Items { respond_to } => {
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                CartRequest::Total { respond_to } => {
                    let total = self.items.iter().map(CartItem::subtotal).sum();
                    let _ = respond_to.send(Ok(total));
                }
                CartRequest::Clear { respond_to } => self.handle_clear(respond_to),
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(fields(item_id = item.id), skip(self, item, respond_to))]
    fn handle_add(&mut self, item: CartItem, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing add request");
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                existing.quantity += item.quantity;
                info!(quantity = existing.quantity, "item quantity merged");
            }
            None => {
                info!(name = %item.name, "item added");
                self.items.push(item);
            }
        }
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(item_id = item_id), skip(self, respond_to))]
    fn handle_increment(&mut self, item_id: u64, respond_to: ServiceResponse<CartItem, CartError>) {
        debug!("Processing increment request");
        let result = match self.items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.quantity += 1;
                Ok(item.clone())
            }
            None => Err(CartError::ItemNotFound(item_id)),
        };
        let _ = respond_to.send(result);
    }

    #[instrument(fields(item_id = item_id), skip(self, respond_to))]
    fn handle_decrement(&mut self, item_id: u64, respond_to: ServiceResponse<CartItem, CartError>) {
        debug!("Processing decrement request");
        let result = match self.items.iter_mut().find(|item| item.id == item_id) {
            Some(item) if item.quantity <= 1 => Err(CartError::WouldRemoveItem(item_id)),
            Some(item) => {
                item.quantity -= 1;
                Ok(item.clone())
            }
            None => Err(CartError::ItemNotFound(item_id)),
        };
        let _ = respond_to.send(result);
    }

    #[instrument(fields(item_id = item_id), skip(self, respond_to))]
    fn handle_remove(&mut self, item_id: u64, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing remove request");
        let result = match self.items.iter().position(|item| item.id == item_id) {
            Some(index) => {
                self.items.remove(index);
                info!("item removed");
                Ok(())
            }
            None => Err(CartError::ItemNotFound(item_id)),
        };
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear(&mut self, respond_to: ServiceResponse<(), CartError>) {
        info!(item_count = self.items.len(), "cart cleared");
        self.items.clear();
        let _ = respond_to.send(Ok(()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_cart() -> CartClient {
        let (service, client) = CartService::new(10);
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn add_merges_quantities_by_item_id() {
        let cart = spawn_cart();
        cart.add(CartItem::new(1, "Matrace — 90×200", 4000.0, 1)).await.unwrap();
        cart.add(CartItem::new(1, "Matrace — 90×200", 4000.0, 2)).await.unwrap();

        let items = cart.items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(cart.total().await.unwrap(), 12_000.0);
    }

    #[tokio::test]
    async fn increment_bumps_quantity_by_one() {
        let cart = spawn_cart();
        cart.add(CartItem::new(1, "Matrace — 90×200", 4000.0, 1)).await.unwrap();

        let item = cart.increment_quantity(1).await.unwrap();
        assert_eq!(item.quantity, 2);

        let err = cart.increment_quantity(9).await.unwrap_err();
        assert_eq!(err, CartError::ItemNotFound(9));
    }

    #[tokio::test]
    async fn decrement_at_one_is_refused() {
        let cart = spawn_cart();
        cart.add(CartItem::new(1, "Matrace — 90×200", 4000.0, 2)).await.unwrap();

        let item = cart.decrement_quantity(1).await.unwrap();
        assert_eq!(item.quantity, 1);

        let err = cart.decrement_quantity(1).await.unwrap_err();
        assert_eq!(err, CartError::WouldRemoveItem(1));
        assert_eq!(cart.items().await.unwrap()[0].quantity, 1);
    }

    #[tokio::test]
    async fn explicit_remove_deletes_the_item() {
        let cart = spawn_cart();
        cart.add(CartItem::new(1, "Matrace — 90×200", 4000.0, 1)).await.unwrap();
        cart.add(CartItem::new(2, "Potah Tencel", 1200.0, 1)).await.unwrap();

        cart.remove(1).await.unwrap();

        let items = cart.items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);

        let err = cart.remove(9).await.unwrap_err();
        assert_eq!(err, CartError::ItemNotFound(9));
    }

    #[tokio::test]
    async fn clear_empties_the_cart_wholesale() {
        let cart = spawn_cart();
        cart.add(CartItem::new(1, "Matrace — 90×200", 4000.0, 1)).await.unwrap();
        cart.add(CartItem::new(2, "Potah Tencel", 1200.0, 3)).await.unwrap();

        cart.clear().await.unwrap();

        assert!(cart.items().await.unwrap().is_empty());
        assert_eq!(cart.total().await.unwrap(), 0.0);
    }
}
