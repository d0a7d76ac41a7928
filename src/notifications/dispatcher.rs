use tracing::{info, warn};

use crate::domain::OrderRecord;

use super::error::NotificationError;
use super::relay::{EmailMessage, EmailParty, EmailRelay, RelayReceipt};
use super::templates;

/// From-identity for every outgoing message.
#[derive(Debug, Clone)]
pub struct SenderIdentity {
    pub email: String,
    pub name: String,
}

/// Renders and submits the two per-order notifications. Works from a
/// persisted order only: by the time this runs, checkout has already
/// succeeded, so nothing here may fail it.
pub struct NotificationDispatcher<R> {
    relay: R,
    sender: SenderIdentity,
    admin_email: String,
}

impl<R: EmailRelay> NotificationDispatcher<R> {
    pub fn new(relay: R, sender: SenderIdentity, admin_email: impl Into<String>) -> Self {
        Self {
            relay,
            sender,
            admin_email: admin_email.into(),
        }
    }

    fn from_party(&self) -> EmailParty {
        EmailParty {
            email: self.sender.email.clone(),
            name: Some(self.sender.name.clone()),
        }
    }

    pub async fn notify_customer(
        &self,
        order: &OrderRecord,
    ) -> Result<RelayReceipt, NotificationError> {
        let message = EmailMessage {
            from: self.from_party(),
            to: vec![EmailParty {
                email: order.customer_email.clone(),
                name: Some(order.customer_name.clone()),
            }],
            subject: templates::customer_subject(order),
            html: templates::customer_html(order),
            text: templates::customer_text(order),
        };
        let receipt = self.relay.send(&message).await?;
        info!(
            order_id = %order.id,
            message_id = receipt.message_id.as_deref().unwrap_or("-"),
            "customer confirmation sent"
        );
        Ok(receipt)
    }

    pub async fn notify_merchant(
        &self,
        order: &OrderRecord,
    ) -> Result<RelayReceipt, NotificationError> {
        let message = EmailMessage {
            from: self.from_party(),
            to: vec![EmailParty {
                email: self.admin_email.clone(),
                name: None,
            }],
            subject: templates::admin_subject(order),
            html: templates::admin_html(order),
            text: templates::admin_text(order),
        };
        let receipt = self.relay.send(&message).await?;
        info!(
            order_id = %order.id,
            message_id = receipt.message_id.as_deref().unwrap_or("-"),
            "merchant notification sent"
        );
        Ok(receipt)
    }

    /// Sends both notifications concurrently; neither depends on the
    /// other's outcome. Failures end in the log, nowhere else.
    pub async fn dispatch(&self, order: &OrderRecord) {
        let (customer, merchant) =
            tokio::join!(self.notify_customer(order), self.notify_merchant(order));
        if let Err(e) = customer {
            warn!(order_id = %order.id, error = %e, "customer confirmation failed");
        }
        if let Err(e) = merchant {
            warn!(order_id = %order.id, error = %e, "merchant notification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CartItem;
    use crate::mock_framework::RecordingRelay;
    use chrono::Utc;

    fn dispatcher(relay: RecordingRelay) -> NotificationDispatcher<RecordingRelay> {
        NotificationDispatcher::new(
            relay,
            SenderIdentity {
                email: "objednavky@example.cz".to_string(),
                name: "Matrace Konfigurátor".to_string(),
            },
            "obchod@example.cz",
        )
    }

    fn order() -> OrderRecord {
        OrderRecord {
            id: "order_3".to_string(),
            customer_name: "Jan Novák".to_string(),
            customer_email: "jan@example.cz".to_string(),
            customer_phone: "+420123456789".to_string(),
            delivery_method: "pickup".to_string(),
            payment_method: "dobirka".to_string(),
            delivery_address: String::new(),
            delivery_city: String::new(),
            delivery_postal_code: String::new(),
            delivery_notes: String::new(),
            mattress_configuration: vec![CartItem::new(1, "Matrace — 160×200", 5000.0, 1)],
            total_price: 5000.0,
            status: "pending".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn customer_message_goes_to_the_customer() {
        let relay = RecordingRelay::new();
        let receipt = dispatcher(relay.clone())
            .notify_customer(&order())
            .await
            .unwrap();

        assert!(receipt.message_id.is_some());
        let sent = relay.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to[0].email, "jan@example.cz");
        assert_eq!(sent[0].subject, "Potvrzení objednávky #order_3");
        assert!(!sent[0].text.is_empty());
        assert!(!sent[0].html.is_empty());
    }

    #[tokio::test]
    async fn merchant_message_goes_to_the_admin_address() {
        let relay = RecordingRelay::new();
        dispatcher(relay.clone())
            .notify_merchant(&order())
            .await
            .unwrap();

        let sent = relay.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to[0].email, "obchod@example.cz");
        assert_eq!(sent[0].to[0].name, None);
        assert_eq!(sent[0].subject, "[NOVÁ OBJEDNÁVKA] #order_3 - Jan Novák");
    }

    #[tokio::test]
    async fn dispatch_swallows_relay_failures() {
        let relay = RecordingRelay::failing();
        // completes without propagating anything
        dispatcher(relay.clone()).dispatch(&order()).await;
        assert!(relay.sent().is_empty());
    }

    #[tokio::test]
    async fn dispatch_sends_both_messages() {
        let relay = RecordingRelay::new();
        dispatcher(relay.clone()).dispatch(&order()).await;
        assert_eq!(relay.sent().len(), 2);
    }
}
