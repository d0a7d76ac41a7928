use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, info_span, warn, Instrument};

use crate::clients::{CartClient, CheckoutClient, OrdersClient};
use crate::domain::{CartItem, CheckoutForm, OrderDraft, OrderInsert};
use crate::error::CheckoutError;
use crate::messages::{CheckoutRequest, ServiceResponse};
use crate::notifications::{EmailRelay, NotificationDispatcher};
use crate::payment::PaymentGateway;

use super::{validator, CheckoutOutcome};

/// Orchestrates checkout attempts: validate → authorize → persist →
/// notify, clearing the cart only once the order is durable.
///
/// Attempts run as background tasks so the message loop stays
/// responsive while the gateway and the store are working; the loop's
/// `in_flight` flag is what refuses a second submit while one is
/// outstanding. One attempt at a time, every retry is a fresh
/// user-initiated submit.
pub struct CheckoutService<P, R> {
    receiver: mpsc::Receiver<CheckoutRequest>,
    self_sender: mpsc::Sender<CheckoutRequest>,
    gateway: Arc<P>,
    orders: OrdersClient,
    cart: CartClient,
    dispatcher: Arc<NotificationDispatcher<R>>,
    in_flight: bool,
}

impl<P: PaymentGateway, R: EmailRelay> CheckoutService<P, R> {
    pub fn new(
        buffer_size: usize,
        gateway: P,
        orders: OrdersClient,
        cart: CartClient,
        dispatcher: NotificationDispatcher<R>,
    ) -> (Self, CheckoutClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            self_sender: sender.clone(),
            gateway: Arc::new(gateway),
            orders,
            cart,
            dispatcher: Arc::new(dispatcher),
            in_flight: false,
        };
        let client = CheckoutClient::new(sender);
        (service, client)
    }

    pub async fn run(mut self) {
        info!("CheckoutService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CheckoutRequest::Submit {
                    form,
                    items,
                    respond_to,
                } => {
                    self.handle_submit(form, items, respond_to);
                }
                CheckoutRequest::Completed => {
                    self.in_flight = false;
                }
                CheckoutRequest::Shutdown => {
                    info!("CheckoutService shutting down");
                    break;
                }
            }
        }
        info!("CheckoutService stopped");
    }

    /// Guard, then hand the attempt to a background task that owns the
    /// responder. An attempt still in flight when the service shuts
    /// down runs to completion detached; its reply is discarded.
    fn handle_submit(
        &mut self,
        form: CheckoutForm,
        items: Vec<CartItem>,
        respond_to: ServiceResponse<CheckoutOutcome, CheckoutError>,
    ) {
        if self.in_flight {
            warn!("submit refused: checkout already in flight");
            let _ = respond_to.send(Err(CheckoutError::CheckoutInProgress));
            return;
        }
        if items.is_empty() {
            let _ = respond_to.send(Err(CheckoutError::EmptyCart));
            return;
        }
        self.in_flight = true;

        let gateway = Arc::clone(&self.gateway);
        let orders = self.orders.clone();
        let cart = self.cart.clone();
        let dispatcher = Arc::clone(&self.dispatcher);
        let done = self.self_sender.clone();

        tokio::spawn(async move {
            let outcome = run_attempt(gateway, orders, cart, dispatcher, form, items)
                .instrument(info_span!("checkout_attempt"))
                .await;
            // Clear the guard before the caller learns the outcome, so
            // an immediate resubmit cannot race into a spurious refusal.
            let _ = done.send(CheckoutRequest::Completed).await;
            let _ = respond_to.send(Ok(outcome));
        });
    }
}

/// One full pipeline run. Stage ordering is strict: the gateway must
/// approve before the order row is written, and the row must exist
/// before any notification goes out.
async fn run_attempt<P: PaymentGateway, R: EmailRelay>(
    gateway: Arc<P>,
    orders: OrdersClient,
    cart: CartClient,
    dispatcher: Arc<NotificationDispatcher<R>>,
    form: CheckoutForm,
    items: Vec<CartItem>,
) -> CheckoutOutcome {
    let errors = validator::validate(&form);
    if !errors.is_empty() {
        info!(field_count = errors.len(), "validation rejected the form");
        return CheckoutOutcome::Rejected(errors);
    }

    let draft = match OrderDraft::from_form(&form, items) {
        Ok(draft) => draft,
        Err(errors) => return CheckoutOutcome::Rejected(errors),
    };

    let payment = match gateway.authorize(&draft.payment_method, &draft).await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "payment attempt could not run");
            return CheckoutOutcome::PaymentDeclined {
                message: e.to_string(),
            };
        }
    };
    if !payment.success {
        info!(method = %payment.method, "payment declined");
        return CheckoutOutcome::PaymentDeclined {
            message: payment.message,
        };
    }
    let transaction_id = payment.transaction_id.unwrap_or_default();
    info!(transaction_id = %transaction_id, "payment authorized");

    let record = match orders.create_order(OrderInsert::from_draft(&draft)).await {
        Ok(record) => record,
        Err(e) => {
            // No refund path exists; leave a reconciliation trail for
            // manual follow-up.
            error!(
                error = %e,
                transaction_id = %transaction_id,
                payment_method = %draft.payment_method,
                total_price = draft.total_price,
                "order persistence failed after successful authorization; reconciliation required"
            );
            return CheckoutOutcome::PersistenceFailed;
        }
    };
    info!(order_id = %record.id, total_price = record.total_price, "order persisted");

    // Fire-and-forget: delivery problems surface in the dispatcher's
    // log, never in the checkout outcome.
    let notify_order = record.clone();
    tokio::spawn(async move {
        dispatcher.dispatch(&notify_order).await;
    });

    if let Err(e) = cart.clear().await {
        warn!(error = %e, "cart clear failed after successful order");
    }

    CheckoutOutcome::Placed(record)
}
