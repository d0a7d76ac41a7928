use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::form::{CheckoutForm, FormField, ValidationErrors};

/// How the finished mattress reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Pickup,
    Courier,
}

impl DeliveryMethod {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "pickup" => Some(Self::Pickup),
            "courier" => Some(Self::Courier),
            _ => None,
        }
    }

    /// Wire code, as submitted by the form and stored in the
    /// `delivery_method` column.
    pub fn code(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Courier => "courier",
        }
    }
}

/// Payment rails offered at checkout. Codes match the form values and
/// the persisted `payment_method` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Comgate,
    Dobirka,
    Card,
    GooglePay,
}

impl PaymentMethod {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "comgate" => Some(Self::Comgate),
            "dobirka" => Some(Self::Dobirka),
            "card" => Some(Self::Card),
            "googlepay" => Some(Self::GooglePay),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Comgate => "comgate",
            Self::Dobirka => "dobirka",
            Self::Card => "card",
            Self::GooglePay => "googlepay",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Comgate => "Comgate",
            Self::Dobirka => "Dobírka",
            Self::Card => "Platební karta",
            Self::GooglePay => "Google Pay",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Comgate => "Karta, internetové bankovnictví",
            Self::Dobirka => "Platba při převzetí",
            Self::Card => "Visa, Mastercard",
            Self::GooglePay => "Rychlá mobilní platba",
        }
    }
}

/// Contact details collected by the checkout form.
#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Delivery selection; address fields are meaningful for courier only.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub method: DeliveryMethod,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub notes: String,
}

/// A checkout submission that has not been persisted yet. Owned by the
/// checkout service for the duration of one attempt.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer: Customer,
    pub delivery: Delivery,
    /// Payment method code as submitted. Kept raw so an unsupported
    /// code travels to the gateway, which is where it is rejected.
    pub payment_method: String,
    pub line_items: Vec<CartItem>,
    pub total_price: f64,
}

impl OrderDraft {
    /// Builds a draft from validated form state and the cart snapshot.
    ///
    /// The total is recomputed from the line items here; the figure the
    /// UI displayed is never trusted.
    pub fn from_form(form: &CheckoutForm, line_items: Vec<CartItem>) -> Result<Self, ValidationErrors> {
        let method = DeliveryMethod::parse(&form.delivery_method).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.insert(
                FormField::DeliveryMethod,
                "Neplatný způsob doručení".to_string(),
            );
            errors
        })?;

        let total_price = line_items.iter().map(CartItem::subtotal).sum();

        Ok(Self {
            customer: Customer {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
            },
            delivery: Delivery {
                method,
                address: form.address.trim().to_string(),
                city: form.city.trim().to_string(),
                postal_code: form.postal_code.trim().to_string(),
                notes: form.delivery_notes.trim().to_string(),
            },
            payment_method: form.payment_method.clone(),
            line_items,
            total_price,
        })
    }
}

/// Row payload written to the `orders` collection. Field names are the
/// store's column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInsert {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_method: String,
    pub payment_method: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_postal_code: String,
    pub delivery_notes: String,
    pub mattress_configuration: Vec<CartItem>,
    pub total_price: f64,
    pub status: String,
}

impl OrderInsert {
    /// Flattens a draft into the row shape. Every new order starts out
    /// pending.
    pub fn from_draft(draft: &OrderDraft) -> Self {
        Self {
            customer_name: draft.customer.name.clone(),
            customer_email: draft.customer.email.clone(),
            customer_phone: draft.customer.phone.clone(),
            delivery_method: draft.delivery.method.code().to_string(),
            payment_method: draft.payment_method.clone(),
            delivery_address: draft.delivery.address.clone(),
            delivery_city: draft.delivery.city.clone(),
            delivery_postal_code: draft.delivery.postal_code.clone(),
            delivery_notes: draft.delivery.notes.clone(),
            mattress_configuration: draft.line_items.clone(),
            total_price: draft.total_price,
            status: "pending".to_string(),
        }
    }
}

/// Durable order row as the store returns it: the inserted fields plus
/// the assigned id and creation timestamp. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_method: String,
    pub payment_method: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_postal_code: String,
    pub delivery_notes: String,
    pub mattress_configuration: Vec<CartItem>,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courier_form() -> CheckoutForm {
        CheckoutForm {
            name: "Jan Novák".to_string(),
            email: "jan@example.cz".to_string(),
            phone: "+420123456789".to_string(),
            delivery_method: "courier".to_string(),
            payment_method: "card".to_string(),
            address: "Dlouhá 12".to_string(),
            city: "Praha".to_string(),
            postal_code: "110 00".to_string(),
            delivery_notes: "Zvonit dvakrát".to_string(),
        }
    }

    #[test]
    fn draft_recomputes_total_from_line_items() {
        let items = vec![
            CartItem::new(1, "Matrace — 160×200", 5000.0, 2),
            CartItem::new(2, "Potah Tencel", 1200.0, 1),
        ];
        let draft = OrderDraft::from_form(&courier_form(), items).unwrap();
        assert_eq!(draft.total_price, 11_200.0);
    }

    #[test]
    fn draft_rejects_unknown_delivery_method() {
        let mut form = courier_form();
        form.delivery_method = "teleport".to_string();
        let errors = OrderDraft::from_form(&form, Vec::new()).unwrap_err();
        assert!(errors.contains_key(&FormField::DeliveryMethod));
    }

    #[test]
    fn insert_row_starts_pending_and_keeps_configuration() {
        let items = vec![CartItem::new(1, "Matrace — 90×200", 4000.0, 1)];
        let draft = OrderDraft::from_form(&courier_form(), items).unwrap();
        let row = OrderInsert::from_draft(&draft);
        assert_eq!(row.status, "pending");
        assert_eq!(row.delivery_method, "courier");
        assert_eq!(row.mattress_configuration.len(), 1);
        assert_eq!(row.total_price, 4000.0);
    }

    #[test]
    fn payment_method_codes_round_trip() {
        for method in [
            PaymentMethod::Comgate,
            PaymentMethod::Dobirka,
            PaymentMethod::Card,
            PaymentMethod::GooglePay,
        ] {
            assert_eq!(PaymentMethod::parse(method.code()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("bitcoin"), None);
    }
}
