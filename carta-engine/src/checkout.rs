//! Order validation and the submission gate
//!
//! `validate_order` accumulates every applicable error in display order:
//! minimum-order first, then the contact fields the order type requires.
//! Callers show the whole list, not just the first entry. The empty-cart
//! check is a precondition of submission handled by `prepare_checkout`,
//! not part of the validator's contract.

use crate::cart::CartService;
use crate::message;
use crate::money::{format_money, to_decimal};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{Config, OrderDetails, OrderType};
use thiserror::Error;

/// Verdict with every applicable plain-language error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

fn is_blank(field: &Option<String>) -> bool {
    field
        .as_deref()
        .map_or(true, |value| value.trim().is_empty())
}

/// Check the order against the business rules and the type's required
/// contact fields
pub fn validate_order(
    details: &OrderDetails,
    subtotal: Decimal,
    config: &Config,
) -> OrderValidation {
    let mut errors = Vec::new();

    if let Some(min_order) = config.min_order {
        let min = to_decimal(min_order);
        if subtotal < min {
            errors.push(format!(
                "El pedido minimo es {}.",
                format_money(min, &config.currency)
            ));
        }
    }

    match details.order_type {
        OrderType::Mesa => {
            if is_blank(&details.table_number) {
                errors.push("Ingresa el numero de mesa.".to_string());
            }
        }
        OrderType::Pickup => {
            if is_blank(&details.pickup_name) {
                errors.push("Ingresa tu nombre para retiro.".to_string());
            }
        }
        OrderType::Delivery => {
            if is_blank(&details.delivery_name) {
                errors.push("Ingresa tu nombre para la entrega.".to_string());
            }
            if is_blank(&details.delivery_address) {
                errors.push("Ingresa la direccion de entrega.".to_string());
            }
            if is_blank(&details.delivery_references) {
                errors.push("Ingresa referencias para la entrega.".to_string());
            }
        }
    }

    OrderValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Why a submission was blocked
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Tu carrito esta vacio.")]
    EmptyCart,

    #[error("{}", .0.join(" "))]
    Validation(Vec<String>),
}

/// Everything the caller needs to hand the order off
#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub message: String,
    pub handoff_url: String,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

/// Gate the submission and, when it passes, compose the final message and
/// deep link. The delivery fee applies only to delivery orders.
pub fn prepare_checkout(
    cart: &CartService,
    details: &OrderDetails,
    config: &Config,
    at: DateTime<Utc>,
) -> Result<CheckoutSummary, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal = cart.subtotal();
    let validation = validate_order(details, subtotal, config);
    if !validation.valid {
        return Err(CheckoutError::Validation(validation.errors));
    }

    let delivery_fee = if details.order_type == OrderType::Delivery {
        to_decimal(config.delivery_fee.unwrap_or(0.0))
    } else {
        Decimal::ZERO
    };
    let message = message::build_order_message(cart.items(), details, config, at);
    let handoff_url = message::build_handoff_url(&config.whatsapp_number, &message);

    Ok(CheckoutSummary {
        message,
        handoff_url,
        subtotal,
        delivery_fee,
        total: subtotal + delivery_fee,
    })
}
