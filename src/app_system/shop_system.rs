use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::cart::CartService;
use crate::checkout::CheckoutService;
use crate::clients::{CartClient, CatalogClient, CheckoutClient, OrdersClient};
use crate::domain::{CoverRow, LayerRow, OrderRecord};
use crate::error::CatalogError;
use crate::notifications::{NotificationDispatcher, RelayKind, SenderIdentity};
use crate::payment::StubGateway;
use crate::store::CollectionActor;

/// The main application system that wires all actors together.
///
/// Responsible for starting the store collections, the cart, and the
/// checkout orchestrator, and for tearing everything down in order.
pub struct ShopSystem {
    pub catalog_client: CatalogClient,
    pub cart_client: CartClient,
    pub orders_client: OrdersClient,
    pub checkout_client: CheckoutClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    pub fn new(relay: RelayKind, sender: SenderIdentity, admin_email: impl Into<String>) -> Self {
        // 1. Catalog collections (read path)
        let layer_row_counter = Arc::new(AtomicU64::new(1));
        let next_layer_row_id = move || layer_row_counter.fetch_add(1, Ordering::SeqCst);
        let (layers_actor, layers_collection) =
            CollectionActor::<LayerRow>::new(32, next_layer_row_id);
        let layers_handle = tokio::spawn(layers_actor.run());

        let cover_row_counter = Arc::new(AtomicU64::new(1));
        let next_cover_row_id = move || cover_row_counter.fetch_add(1, Ordering::SeqCst);
        let (covers_actor, covers_collection) =
            CollectionActor::<CoverRow>::new(32, next_cover_row_id);
        let covers_handle = tokio::spawn(covers_actor.run());

        let catalog_client = CatalogClient::new(layers_collection, covers_collection);

        // 2. Orders collection
        let order_counter = Arc::new(AtomicU64::new(1));
        let next_order_id = move || {
            let id = order_counter.fetch_add(1, Ordering::SeqCst);
            format!("order_{id}")
        };
        let (orders_actor, orders_collection) =
            CollectionActor::<OrderRecord>::new(32, next_order_id);
        let orders_client = OrdersClient::new(orders_collection);
        let orders_handle = tokio::spawn(orders_actor.run());

        // 3. Cart
        let (cart_actor, cart_client) = CartService::new(32);
        let cart_handle = tokio::spawn(cart_actor.run());

        // 4. Checkout orchestrator over the stub gateway and the relay
        let dispatcher = NotificationDispatcher::new(relay, sender, admin_email);
        let (checkout_actor, checkout_client) = CheckoutService::new(
            32,
            StubGateway::new(),
            orders_client.clone(),
            cart_client.clone(),
            dispatcher,
        );
        let checkout_handle = tokio::spawn(checkout_actor.run());

        Self {
            catalog_client,
            cart_client,
            orders_client,
            checkout_client,
            handles: vec![
                layers_handle,
                covers_handle,
                orders_handle,
                cart_handle,
                checkout_handle,
            ],
        }
    }

    /// Loads the catalog collections with seed rows.
    pub async fn seed_catalog(
        &self,
        layers: Vec<LayerRow>,
        covers: Vec<CoverRow>,
    ) -> Result<(), CatalogError> {
        self.catalog_client.seed(layers, covers).await
    }

    /// Stops the bespoke actors explicitly, then drops every client so
    /// the collection actors see their channels close, and finally
    /// waits for all loops to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.checkout_client.shutdown().await;
        self.cart_client.shutdown().await;

        drop(self.checkout_client);
        drop(self.cart_client);
        drop(self.catalog_client);
        drop(self.orders_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
