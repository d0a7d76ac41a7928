mod app_system;
mod cart;
mod catalog;
mod checkout;
mod clients;
mod config;
mod domain;
mod error;
mod messages;
mod notifications;
mod orders;
mod payment;
mod store;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, ShopSystem};
use crate::checkout::CheckoutOutcome;
use crate::config::RelayConfig;
use crate::domain::{CartItem, CheckoutForm, CoverRow, LayerRow, PaymentMethod};
use crate::notifications::{LoggingRelay, MailerSendRelay, RelayKind, SenderIdentity};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting mattress storefront");

    let (relay, sender, admin_email) = match RelayConfig::from_env() {
        Ok(config) => {
            let sender = SenderIdentity {
                email: config.from_email.clone(),
                name: config.from_name.clone(),
            };
            (
                RelayKind::MailerSend(MailerSendRelay::new(config.api_key)),
                sender,
                config.admin_email,
            )
        }
        Err(e) => {
            warn!(error = %e, "email relay not configured; messages will be logged only");
            (
                RelayKind::Logging(LoggingRelay),
                SenderIdentity {
                    email: "objednavky@matrace-konfigurator.cz".to_string(),
                    name: "Matrace Konfigurátor".to_string(),
                },
                "obchod@matrace-konfigurator.cz".to_string(),
            )
        }
    };

    // Create the entire shop system (starts all actors)
    let system = ShopSystem::new(relay, sender, admin_email);

    system
        .seed_catalog(default_layer_rows(), default_cover_rows())
        .await
        .map_err(|e| e.to_string())?;

    let layers = system.catalog_client.layers().await.map_err(|e| e.to_string())?;
    let covers = system.catalog_client.covers().await.map_err(|e| e.to_string())?;
    info!(
        layer_count = layers.len(),
        cover_count = covers.len(),
        "catalog loaded"
    );
    for layer in &layers {
        info!(
            layer_id = layer.id,
            name = %layer.name,
            slug = %layer.slug,
            icon = %layer.icon,
            sizes = layer.prices.len(),
            heights = layer.available_heights.len(),
            "layer option"
        );
    }
    for cover in &covers {
        info!(
            cover_id = cover.id,
            name = %cover.name,
            slug = %cover.slug,
            icon = %cover.icon,
            price = cover.price,
            "cover option"
        );
    }
    for method in [
        PaymentMethod::Comgate,
        PaymentMethod::Dobirka,
        PaymentMethod::Card,
        PaymentMethod::GooglePay,
    ] {
        info!(
            code = method.code(),
            name = method.display_name(),
            description = method.description(),
            "payment option"
        );
    }

    // Compose a mattress the way the configurator would: a core layer
    // priced for the chosen size plus a cover.
    let size = "160x200";
    let core = layers.first().ok_or("catalog has no layers")?;
    let core_price = core.prices.get(size).copied().unwrap_or(0.0);
    let cover = covers.first().ok_or("catalog has no covers")?;

    let span = tracing::info_span!("cart_preparation");
    let items = async {
        system
            .cart_client
            .add(CartItem::new(
                1,
                format!("Matrace {} — {}", core.name, size),
                core_price,
                1,
            ))
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .add(CartItem::new(2, cover.name.clone(), cover.price, 1))
            .await
            .map_err(|e| e.to_string())?;

        let total = system.cart_client.total().await.map_err(|e| e.to_string())?;
        info!(total_price = total, "cart ready");
        system.cart_client.items().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    // Submit a pickup order paid on delivery - this flows through the
    // validator, the payment stub, the orders collection and the
    // notification dispatcher.
    let form = CheckoutForm {
        name: "Jan Novák".to_string(),
        email: "jan.novak@example.cz".to_string(),
        phone: "+420 123 456 789".to_string(),
        delivery_method: "pickup".to_string(),
        payment_method: "dobirka".to_string(),
        ..CheckoutForm::default()
    };

    let span = tracing::info_span!("order_processing");
    let outcome = async {
        info!("Submitting checkout");
        system
            .checkout_client
            .submit(form, items)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    match outcome {
        CheckoutOutcome::Placed(order) => {
            info!(
                order_id = %order.id,
                total_price = order.total_price,
                status = %order.status,
                "order placed"
            );
            // Back-office read path: the row is durably visible.
            let stored = system
                .orders_client
                .get_order(order.id.clone())
                .await
                .map_err(|e| e.to_string())?;
            if let Some(stored) = stored {
                info!(
                    order_id = %stored.id,
                    created_at = %stored.created_at,
                    "order visible in administration"
                );
            }
        }
        CheckoutOutcome::Rejected(errors) => {
            for (field, message) in &errors {
                warn!(field = %field, message = %message, "form field rejected");
            }
        }
        CheckoutOutcome::PaymentDeclined { message } => {
            warn!(message = %message, "payment declined");
        }
        CheckoutOutcome::PersistenceFailed => {
            error!("order could not be saved; please retry");
        }
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

/// Seed rows for the layer collection: each layer type priced per size.
fn default_layer_rows() -> Vec<LayerRow> {
    let mut rows = Vec::new();
    let layers: [(u32, &str, &str, &[u32]); 4] = [
        (1, "Studená pěna", "studena-pena", &[4, 6, 8]),
        (2, "Paměťová pěna", "pametova-pena", &[4, 6]),
        (3, "Latex", "latex", &[4, 6]),
        (4, "Kokosové vlákno", "kokosove-vlakno", &[2, 4]),
    ];
    let sizes: [(&str, f64); 4] = [
        ("80x200", 1.0),
        ("90x200", 1.1),
        ("160x200", 1.9),
        ("180x200", 2.1),
    ];
    for (layer_id, name, slug, heights) in layers {
        let base_price = 1200.0 + f64::from(layer_id) * 400.0;
        for (size, factor) in sizes {
            rows.push(LayerRow {
                row_id: 0,
                layer_id,
                layer_name: name.to_string(),
                size: size.to_string(),
                price: (base_price * factor).round(),
                available_heights: heights.to_vec(),
                icon_path: format!("/layers/{slug}.png"),
                slug: slug.to_string(),
            });
        }
    }
    rows
}

fn default_cover_rows() -> Vec<CoverRow> {
    [
        (1, "Bavlněný potah", 900.0, "bavlneny-potah"),
        (2, "Potah Tencel", 1200.0, "potah-tencel"),
        (3, "Potah Aloe Vera", 1400.0, "potah-aloe-vera"),
    ]
    .into_iter()
    .map(|(cover_id, name, price, slug)| CoverRow {
        row_id: 0,
        cover_id,
        cover_name: name.to_string(),
        price,
        slug: slug.to_string(),
        icon_path: format!("/covers/{slug}.png"),
    })
    .collect()
}
