//! Pure, synchronous form validation. No side effects; the orchestrator
//! refuses to proceed while the returned map is non-empty.

use crate::domain::{CheckoutForm, FormField, ValidationErrors};

pub fn validate(form: &CheckoutForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert(FormField::Name, "Jméno je povinné".to_string());
    } else if name.chars().count() < 2 {
        errors.insert(
            FormField::Name,
            "Jméno musí mít minimálně 2 znaky".to_string(),
        );
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert(FormField::Email, "Email je povinný".to_string());
    } else if !is_valid_email(email) {
        errors.insert(FormField::Email, "Neplatný formát emailu".to_string());
    }

    if form.phone.trim().is_empty() {
        errors.insert(FormField::Phone, "Telefon je povinný".to_string());
    } else if !is_valid_phone(&form.phone) {
        errors.insert(FormField::Phone, "Neplatný formát telefonu".to_string());
    }

    // Address block applies to courier delivery only; pickup skips it
    // even when the fields are empty.
    if form.delivery_method == "courier" {
        if form.address.trim().is_empty() {
            errors.insert(
                FormField::Address,
                "Adresa je povinná pro doručení".to_string(),
            );
        }
        if form.city.trim().is_empty() {
            errors.insert(
                FormField::City,
                "Město je povinné pro doručení".to_string(),
            );
        }
        let postal = form.postal_code.trim();
        if postal.is_empty() {
            errors.insert(FormField::PostalCode, "PSČ je povinné".to_string());
        } else if !is_valid_postal_code(postal) {
            errors.insert(
                FormField::PostalCode,
                "Neplatný formát PSČ (například: 110 00)".to_string(),
            );
        }
    }

    errors
}

/// `local@domain.tld`: no whitespace, one `@`, and a dot with something
/// on both sides in the domain part.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Czech number: optional `+420` prefix, then exactly nine digits,
/// whitespace ignored.
fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix("+420").unwrap_or(&compact);
    digits.len() == 9 && digits.chars().all(|c| c.is_ascii_digit())
}

/// `DDD DD` with the space optional: "110 00" and "11000" both pass.
fn is_valid_postal_code(postal: &str) -> bool {
    let bytes = postal.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        6 => {
            bytes[..3].iter().all(u8::is_ascii_digit)
                && bytes[3] == b' '
                && bytes[4..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}
