//! Order message composition and WhatsApp handoff
//!
//! Renders the final order as the multi-line WhatsApp text and derives the
//! deep-link URL. The output is deterministic for a given (items, order,
//! config, timestamp) — the timestamp is an input, not a hidden clock
//! read. All money goes through the money module's formatter.
//!
//! Blank-field policy: fields the order type requires render with an
//! explicit placeholder when blank; optional fields are omitted entirely.

use crate::money;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{CartItem, Config, OrderDetails, OrderType};

/// Visual separator between message sections
const SEPARATOR: &str = "--------------------------------";

/// Order type label with its emoji, in the storefront's language
fn order_type_label(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::Mesa => "🍽️ En Mesa",
        OrderType::Pickup => "🛍️ Para Llevar (Pickup)",
        OrderType::Delivery => "🛵 A Domicilio",
    }
}

fn trimmed(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Header timestamp in the business's local time when the configured
/// timezone resolves, otherwise UTC
fn header_timestamp(config: &Config, at: DateTime<Utc>) -> String {
    let tz: Option<Tz> = config
        .schedule
        .as_ref()
        .and_then(|schedule| schedule.timezone.parse().ok());
    match tz {
        Some(tz) => at.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string(),
        None => at.format("%d/%m/%Y %H:%M").to_string(),
    }
}

/// Render the order summary text handed to the chat channel
pub fn build_order_message(
    items: &[CartItem],
    order: &OrderDetails,
    config: &Config,
    at: DateTime<Utc>,
) -> String {
    let currency = config.currency.as_str();
    let subtotal = money::cart_subtotal(items);
    let delivery_fee = if order.order_type == OrderType::Delivery {
        money::to_decimal(config.delivery_fee.unwrap_or(0.0))
    } else {
        Decimal::ZERO
    };
    let total = subtotal + delivery_fee;

    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push(format!("*{}*", config.business_name.to_uppercase()));
    lines.push(format!("📅 {}", header_timestamp(config, at)));
    lines.push(format!("📄 Tipo: *{}*", order_type_label(order.order_type)));
    lines.push(SEPARATOR.to_string());

    // Customer block
    match order.order_type {
        OrderType::Mesa => {
            lines.push(format!(
                "📍 *Mesa:* {}",
                trimmed(&order.table_number).unwrap_or("N/A")
            ));
        }
        OrderType::Pickup => {
            lines.push(format!(
                "👤 *Cliente:* {}",
                trimmed(&order.pickup_name).unwrap_or("No especificado")
            ));
            if let Some(time) = trimmed(&order.pickup_time) {
                lines.push(format!("⏰ *Hora:* {}", time));
            }
        }
        OrderType::Delivery => {
            lines.push(format!(
                "👤 *Cliente:* {}",
                trimmed(&order.delivery_name).unwrap_or("No especificado")
            ));
            lines.push(format!(
                "📍 *Direccion:* {}",
                trimmed(&order.delivery_address).unwrap_or("No especificada")
            ));
            if let Some(references) = trimmed(&order.delivery_references) {
                lines.push(format!("🗺️ *Ref:* {}", references));
            }
            if let Some(phone) = trimmed(&order.delivery_phone) {
                lines.push(format!("📞 *Tel:* {}", phone));
            }
            if let Some(notes) = trimmed(&order.delivery_notes) {
                lines.push(format!("📝 *Nota:* {}", notes));
            }
        }
    }

    lines.push(SEPARATOR.to_string());
    lines.push("*📝 RESUMEN DEL PEDIDO:*".to_string());
    lines.push(String::new());

    // Items, in cart order
    for item in items {
        let unit = money::unit_price(item);
        let item_total = money::line_total(item);

        lines.push(format!("▪️ *{} x {}*", item.quantity, item.name));
        lines.push(format!("   (Unit: {})", money::format_money(unit, currency)));
        for option in &item.variant_selections {
            lines.push(format!("   └ _{}: {}_", option.group_name, option.name));
        }
        for option in &item.extra_selections {
            lines.push(format!("   └ + {}", option.name));
        }
        if let Some(notes) = trimmed(&item.notes) {
            lines.push(format!("   ⚠️ Nota: {}", notes));
        }
        lines.push(format!(
            "   💲 Sub: {}",
            money::format_money(item_total, currency)
        ));
        lines.push(String::new());
    }

    lines.push(SEPARATOR.to_string());

    // Totals
    lines.push(format!(
        "💰 *Subtotal:* {}",
        money::format_money(subtotal, currency)
    ));
    if delivery_fee > Decimal::ZERO {
        lines.push(format!(
            "🛵 *Envío:* {}",
            money::format_money(delivery_fee, currency)
        ));
    }
    lines.push(format!(
        "💵 *TOTAL A PAGAR: {}*",
        money::format_money(total, currency)
    ));
    lines.push(SEPARATOR.to_string());

    if !config.hours_text.is_empty() {
        lines.push(format!("🕒 Horario: {}", config.hours_text));
    }
    lines.push(String::new());
    lines.push("✅ _Envía este mensaje para confirmar tu pedido._".to_string());

    lines.join("\n")
}

/// Deep link that opens the chat with the message pre-filled
///
/// The destination is normalized to digits only; formatting characters
/// ("+", spaces, dashes) are accepted on input but never emitted.
pub fn build_handoff_url(whatsapp_number: &str, message: &str) -> String {
    let digits: String = whatsapp_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(message))
}
