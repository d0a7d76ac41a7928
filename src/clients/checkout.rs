use tokio::sync::mpsc;

use crate::checkout::CheckoutOutcome;
use crate::client_method;
use crate::domain::{CartItem, CheckoutForm};
use crate::error::CheckoutError;
use crate::messages::CheckoutRequest;

/// Client for the checkout orchestrator.
#[derive(Clone)]
pub struct CheckoutClient {
    sender: mpsc::Sender<CheckoutRequest>,
}

impl CheckoutClient {
    pub fn new(sender: mpsc::Sender<CheckoutRequest>) -> Self {
        Self { sender }
    }

    /// Stops the orchestrator loop. An attempt already in flight runs
    /// to completion detached; its reply is discarded.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(CheckoutRequest::Shutdown).await;
    }
}

client_method!(CheckoutClient => fn submit(form: CheckoutForm, items: Vec<CartItem>) -> CheckoutOutcome as CheckoutRequest::Submit, Error = CheckoutError);
