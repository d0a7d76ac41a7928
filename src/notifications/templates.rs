//! Message rendering for the transactional emails. Every message is
//! produced as an HTML and plain-text twin; the relay requires both.

use crate::domain::{CartItem, DeliveryMethod, OrderRecord, PaymentMethod};

/// Display label for a payment method code. Unknown codes pass through
/// unchanged; that is the documented fallback, not an error.
pub fn payment_method_label(code: &str) -> String {
    match PaymentMethod::parse(code) {
        Some(PaymentMethod::Comgate) => "Comgate (karta, internetové bankovnictví)".to_string(),
        Some(PaymentMethod::Dobirka) => "Dobírka (platba při převzetí)".to_string(),
        Some(PaymentMethod::Card) => "Platební karta (Visa, Mastercard)".to_string(),
        Some(PaymentMethod::GooglePay) => "Google Pay".to_string(),
        None => code.to_string(),
    }
}

/// Display label for a delivery method code; unknown codes pass through.
pub fn delivery_method_label(code: &str) -> String {
    match DeliveryMethod::parse(code) {
        Some(DeliveryMethod::Pickup) => "Osobní odběr".to_string(),
        Some(DeliveryMethod::Courier) => "Doručení na adresu".to_string(),
        None => code.to_string(),
    }
}

/// Whole-crown amount with space-grouped thousands: "12 500 Kč".
pub fn format_czk(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits: Vec<char> = whole.abs().to_string().chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*ch);
    }
    let sign = if whole < 0 { "-" } else { "" };
    format!("{sign}{grouped} Kč")
}

fn format_date(order: &OrderRecord) -> String {
    order.created_at.format("%-d. %-m. %Y").to_string()
}

fn items_text(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{} - {} ({}ks)",
                item.name,
                format_czk(item.price),
                item.quantity
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn items_html(items: &[CartItem]) -> String {
    let mut html = String::from(
        "<table width=\"100%\" cellpadding=\"4\" cellspacing=\"0\">\n\
         <tr><th align=\"left\">Položka</th><th align=\"right\">Cena</th>\
         <th align=\"right\">Počet kusů</th><th align=\"right\">Celkem</th></tr>\n",
    );
    for item in items {
        html.push_str(&format!(
            "<tr><td>{}</td><td align=\"right\">{}</td><td align=\"right\">{}</td>\
             <td align=\"right\">{}</td></tr>\n",
            item.name,
            format_czk(item.price),
            item.quantity,
            format_czk(item.subtotal()),
        ));
    }
    html.push_str("</table>");
    html
}

fn address_or_pickup(order: &OrderRecord) -> String {
    if order.delivery_address.is_empty() {
        "Osobní odběr".to_string()
    } else {
        format!(
            "{}, {}, {}",
            order.delivery_address, order.delivery_city, order.delivery_postal_code
        )
    }
}

fn notes_or_default(order: &OrderRecord) -> &str {
    if order.delivery_notes.is_empty() {
        "Žádné poznámky"
    } else {
        &order.delivery_notes
    }
}

pub fn customer_subject(order: &OrderRecord) -> String {
    format!("Potvrzení objednávky #{}", order.id)
}

pub fn customer_text(order: &OrderRecord) -> String {
    format!(
        "Vážený/á {name},\n\n\
         děkujeme za vaši objednávku! Vaše objednávka byla úspěšně vytvořena.\n\n\
         DETAILY OBJEDNÁVKY:\n\
         - Číslo objednávky: #{id}\n\
         - Datum: {date}\n\
         - Celková částka: {total}\n\n\
         ZPŮSOB PLATBY: {payment}\n\
         ZPŮSOB DORUČENÍ: {delivery}\n\
         ADRESA DORUČENÍ: {address}\n\
         POZNÁMKY: {notes}\n\n\
         OBJEDNANÉ PRODUKTY:\n\
         {items}\n\n\
         KONTAKTNÍ ÚDAJE:\n\
         - E-mail: {email}\n\
         - Telefon: {phone}\n\n\
         Náš tým vás bude kontaktovat do 24 hodin pro upřesnění dalších kroků.\n\n\
         Děkujeme za důvěru!\n\n\
         Váš tým matrace-konfigurátor.cz\n",
        name = order.customer_name,
        id = order.id,
        date = format_date(order),
        total = format_czk(order.total_price),
        payment = payment_method_label(&order.payment_method),
        delivery = delivery_method_label(&order.delivery_method),
        address = address_or_pickup(order),
        notes = notes_or_default(order),
        items = items_text(&order.mattress_configuration),
        email = order.customer_email,
        phone = order.customer_phone,
    )
}

pub fn customer_html(order: &OrderRecord) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n\
         <h2>Potvrzení objednávky #{id}</h2>\n\
         <p>Vážený/á {name}, děkujeme za vaši objednávku!</p>\n\
         <table cellpadding=\"4\" cellspacing=\"0\">\n\
         <tr><td>Číslo objednávky:</td><td><strong>#{id}</strong></td></tr>\n\
         <tr><td>Datum:</td><td>{date}</td></tr>\n\
         <tr><td>Způsob platby:</td><td>{payment}</td></tr>\n\
         <tr><td>Způsob doručení:</td><td>{delivery}</td></tr>\n\
         <tr><td>Adresa doručení:</td><td>{address}</td></tr>\n\
         <tr><td>Poznámky:</td><td>{notes}</td></tr>\n\
         </table>\n\
         <h3>Objednané položky</h3>\n\
         {items}\n\
         <p><strong>Celková cena: {total}</strong></p>\n\
         <p>Náš tým vás bude kontaktovat do 24 hodin.</p>\n\
         <p>Váš tým matrace-konfigurátor.cz</p>\n\
         </body>\n</html>\n",
        id = order.id,
        name = order.customer_name,
        date = format_date(order),
        payment = payment_method_label(&order.payment_method),
        delivery = delivery_method_label(&order.delivery_method),
        address = address_or_pickup(order),
        notes = notes_or_default(order),
        items = items_html(&order.mattress_configuration),
        total = format_czk(order.total_price),
    )
}

pub fn admin_subject(order: &OrderRecord) -> String {
    format!("[NOVÁ OBJEDNÁVKA] #{} - {}", order.id, order.customer_name)
}

pub fn admin_text(order: &OrderRecord) -> String {
    format!(
        "NOVÁ OBJEDNÁVKA #{id}\n\n\
         ZÁKAZNÍK:\n\
         - Jméno: {name}\n\
         - E-mail: {email}\n\
         - Telefon: {phone}\n\n\
         OBJEDNÁVKA:\n\
         - Číslo: #{id}\n\
         - Datum: {date}\n\
         - Částka: {total}\n\
         - Platba: {payment}\n\
         - Doručení: {delivery}\n\
         - Adresa: {address}\n\
         - Poznámky: {notes}\n\n\
         PRODUKTY:\n\
         {items}\n\n\
         Přihlašte se do administrace pro zpracování objednávky.\n",
        id = order.id,
        name = order.customer_name,
        email = order.customer_email,
        phone = order.customer_phone,
        date = format_date(order),
        total = format_czk(order.total_price),
        payment = payment_method_label(&order.payment_method),
        delivery = delivery_method_label(&order.delivery_method),
        address = address_or_pickup(order),
        notes = notes_or_default(order),
        items = items_text(&order.mattress_configuration),
    )
}

pub fn admin_html(order: &OrderRecord) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n\
         <h2>Nová objednávka #{id}</h2>\n\
         <table cellpadding=\"4\" cellspacing=\"0\">\n\
         <tr><td>Zákazník:</td><td>{name}</td></tr>\n\
         <tr><td>E-mail:</td><td>{email}</td></tr>\n\
         <tr><td>Telefon:</td><td>{phone}</td></tr>\n\
         <tr><td>Datum:</td><td>{date}</td></tr>\n\
         <tr><td>Platba:</td><td>{payment}</td></tr>\n\
         <tr><td>Doručení:</td><td>{delivery}</td></tr>\n\
         <tr><td>Adresa:</td><td>{address}</td></tr>\n\
         </table>\n\
         <h3>Produkty</h3>\n\
         {items}\n\
         <p><strong>Částka: {total}</strong></p>\n\
         <p>Přihlašte se do administrace pro zpracování objednávky.</p>\n\
         </body>\n</html>\n",
        id = order.id,
        name = order.customer_name,
        email = order.customer_email,
        phone = order.customer_phone,
        date = format_date(order),
        payment = payment_method_label(&order.payment_method),
        delivery = delivery_method_label(&order.delivery_method),
        address = address_or_pickup(order),
        items = items_html(&order.mattress_configuration),
        total = format_czk(order.total_price),
    )
}
