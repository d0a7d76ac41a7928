use chrono::{DateTime, Utc};

use crate::domain::{OrderInsert, OrderRecord};
use crate::store::{Record, StoreError};

impl Record for OrderRecord {
    type Id = String;
    type Insert = OrderInsert;

    /// Flattened draft plus the store-assigned id and timestamp. The
    /// row is never patched afterwards; status transitions happen in
    /// back-office tooling, not here.
    fn from_insert(
        id: String,
        created_at: DateTime<Utc>,
        payload: OrderInsert,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            id,
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            delivery_method: payload.delivery_method,
            payment_method: payload.payment_method,
            delivery_address: payload.delivery_address,
            delivery_city: payload.delivery_city,
            delivery_postal_code: payload.delivery_postal_code,
            delivery_notes: payload.delivery_notes,
            mattress_configuration: payload.mattress_configuration,
            total_price: payload.total_price,
            status: payload.status,
            created_at,
        })
    }
}
