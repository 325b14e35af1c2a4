//! Money calculation utilities using rust_decimal for precision
//!
//! Catalog and cart models store prices as `f64` for serialization; every
//! calculation in here runs on `Decimal` and converts back at the edges,
//! rounded to 2 decimal places.

use rust_decimal::prelude::*;
use shared::models::{CartItem, MenuItem};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Per-unit price of a cart line
///
/// Formula: base_price + Σ variant selection prices + Σ extra selection
/// prices. Selections carry price snapshots, so this never consults the
/// catalog.
pub fn unit_price(item: &CartItem) -> Decimal {
    let variant_total: Decimal = item
        .variant_selections
        .iter()
        .map(|option| to_decimal(option.price))
        .sum();
    let extras_total: Decimal = item
        .extra_selections
        .iter()
        .map(|option| to_decimal(option.price))
        .sum();

    (to_decimal(item.base_price) + variant_total + extras_total)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total: unit_price * quantity
pub fn line_total(item: &CartItem) -> Decimal {
    (unit_price(item) * Decimal::from(item.quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Cart subtotal: Σ line totals; an empty cart is exactly 0
pub fn cart_subtotal(items: &[CartItem]) -> Decimal {
    items.iter().map(line_total).sum()
}

/// "Starting at" display price for a catalog product
///
/// Base price plus, for each *required* variant group, that group's
/// cheapest option. Optional groups and extras are add-ons and never
/// contribute. A required group with zero options contributes nothing.
pub fn starting_price(product: &MenuItem) -> Decimal {
    let mut total = to_decimal(product.base_price);
    for group in &product.variants {
        if !group.required {
            continue;
        }
        if let Some(min) = group
            .options
            .iter()
            .map(|option| to_decimal(option.price))
            .min()
        {
            total += min;
        }
    }
    total
}

/// Format a monetary value for display: currency code, two decimals
///
/// Example: `format_money(to_decimal(25.5), "PEN")` → `"PEN 25.50"`.
/// This is the single formatting routine; validator messages and the
/// composed order message both go through it.
pub fn format_money(value: Decimal, currency: &str) -> String {
    format!("{} {:.2}", currency, to_f64(value))
}
