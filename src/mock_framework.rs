//! # Mock Framework
//!
//! Utilities for testing clients and the checkout pipeline in
//! isolation.
//!
//! Instead of spinning up real actors, tests get a client whose
//! messages land on a channel the test controls. The test inspects
//! each request and answers it explicitly, which makes success,
//! failure and in-flight interleavings deterministic. The same idea
//! covers the payment gateway (channel-driven [`MockGateway`]) and the
//! email relay (in-memory [`RecordingRelay`]).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};

use crate::domain::OrderDraft;
use crate::notifications::{EmailMessage, EmailRelay, RelayError, RelayReceipt};
use crate::payment::{PaymentError, PaymentGateway, PaymentResult};
use crate::store::{CollectionClient, Record, StoreError, StoreRequest};

/// Creates a collection client and a receiver for asserting requests.
pub fn create_mock_collection<T: Record>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Verifies that the next store message is an Insert request.
pub async fn expect_insert<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Insert, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Verifies that the next store message is a Get request.
#[allow(dead_code)]
pub async fn expect_get<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// One authorization call as the checkout pipeline issued it; the test
/// answers through `respond_to`.
#[derive(Debug)]
pub struct AuthorizeCall {
    pub method: String,
    pub total_price: f64,
    pub respond_to: oneshot::Sender<Result<PaymentResult, PaymentError>>,
}

/// Channel-driven payment gateway.
pub struct MockGateway {
    sender: mpsc::Sender<AuthorizeCall>,
}

pub fn create_mock_gateway(buffer_size: usize) -> (MockGateway, mpsc::Receiver<AuthorizeCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockGateway { sender }, receiver)
}

impl PaymentGateway for MockGateway {
    async fn authorize(
        &self,
        method: &str,
        draft: &OrderDraft,
    ) -> Result<PaymentResult, PaymentError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AuthorizeCall {
                method: method.to_string(),
                total_price: draft.total_price,
                respond_to,
            })
            .await
            .expect("mock gateway receiver dropped");
        response.await.expect("mock gateway response dropped")
    }
}

/// Ready-made gateway answers.
pub fn approved(method: &str) -> PaymentResult {
    PaymentResult {
        success: true,
        transaction_id: Some(format!("TEST_{method}_1")),
        method: method.to_string(),
        message: "Platba úspěšně dokončena".to_string(),
    }
}

pub fn declined(method: &str, message: &str) -> PaymentResult {
    PaymentResult {
        success: false,
        transaction_id: None,
        method: method.to_string(),
        message: message.to_string(),
    }
}

/// In-memory relay that records every accepted message; can be switched
/// to fail every send to exercise the swallow-and-log path.
#[derive(Clone, Default)]
pub struct RecordingRelay {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    counter: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailRelay for RecordingRelay {
    async fn send(&self, message: &EmailMessage) -> Result<RelayReceipt, RelayError> {
        if self.fail {
            return Err(RelayError::Transport("simulated relay outage".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(RelayReceipt {
            message_id: Some(format!("msg_{id}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::OrdersClient;
    use crate::domain::{CartItem, CheckoutForm, OrderInsert, OrderRecord};

    #[tokio::test]
    async fn mock_collection_answers_create() {
        let (collection, mut receiver) = create_mock_collection::<OrderRecord>(10);
        let orders = OrdersClient::new(collection);

        let create_task = tokio::spawn(async move {
            let form = CheckoutForm {
                name: "Jan Novák".to_string(),
                email: "jan@example.cz".to_string(),
                phone: "+420123456789".to_string(),
                payment_method: "dobirka".to_string(),
                ..CheckoutForm::default()
            };
            let items = vec![CartItem::new(1, "Matrace — 90×200", 4000.0, 1)];
            let draft = crate::domain::OrderDraft::from_form(&form, items).unwrap();
            orders.create_order(OrderInsert::from_draft(&draft)).await
        });

        let (payload, respond_to) = expect_insert(&mut receiver).await.expect("expected insert");
        assert_eq!(payload.status, "pending");
        let record = OrderRecord::from_insert(
            "order_1".to_string(),
            chrono::Utc::now(),
            payload,
        )
        .unwrap();
        respond_to.send(Ok(record)).unwrap();

        let stored = create_task.await.unwrap().unwrap();
        assert_eq!(stored.id, "order_1");
    }
}
