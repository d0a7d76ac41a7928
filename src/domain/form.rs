use std::collections::BTreeMap;
use std::fmt;

/// Raw checkout form state as the UI submits it. Everything is a string;
/// typed interpretation happens when the draft is built.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub delivery_method: String,
    pub payment_method: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub delivery_notes: String,
}

impl Default for CheckoutForm {
    /// The form as first rendered: personal pickup, Comgate preselected.
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            delivery_method: "pickup".to_string(),
            payment_method: "comgate".to_string(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            delivery_notes: String::new(),
        }
    }
}

/// Form fields that can carry a validation error. The `Display` form is
/// the key the UI uses to attach inline messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Phone,
    DeliveryMethod,
    Address,
    City,
    PostalCode,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::DeliveryMethod => "deliveryMethod",
            FormField::Address => "address",
            FormField::City => "city",
            FormField::PostalCode => "postalCode",
        };
        f.write_str(key)
    }
}

/// Field-level validation errors. Absence of a key means the field is
/// valid; an empty map means the form may proceed to payment.
pub type ValidationErrors = BTreeMap<FormField, String>;
