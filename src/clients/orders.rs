use tracing::{debug, instrument};

use crate::domain::{OrderInsert, OrderRecord};
use crate::error::OrderError;
use crate::store::{CollectionClient, StoreError};
use crate::{impl_client_new, impl_collection_client_methods};

/// Client for the `orders` collection.
#[derive(Clone)]
pub struct OrdersClient {
    inner: CollectionClient<OrderRecord>,
}

impl_client_new!(OrdersClient, OrderRecord);
impl_collection_client_methods!(OrdersClient, OrderRecord, OrderError, order, orders);

impl OrdersClient {
    /// Persists one order row; replies with the stored record including
    /// the assigned id and timestamp. Rejections propagate — there is
    /// no internal retry, that policy belongs to the caller.
    #[instrument(skip(self, row), fields(total_price = row.total_price))]
    pub async fn create_order(&self, row: OrderInsert) -> Result<OrderRecord, OrderError> {
        debug!("Sending request");
        self.inner.insert(row).await.map_err(|e| match e {
            StoreError::Disconnected => {
                OrderError::ActorCommunicationError("store disconnected".to_string())
            }
            other => OrderError::DatabaseError(other.to_string()),
        })
    }
}
