//! Catalog Models
//!
//! Read-only catalog entities loaded once at session start. Prices are in
//! currency units (e.g., 12.50 = S/ 12.50); precise arithmetic happens in
//! the engine's money module, never here.

use serde::{Deserialize, Serialize};

/// Single-choice customization option (embedded in VariantGroup)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOption {
    pub id: String,
    pub name: String,
    /// Price contribution when selected (added to the product base price)
    pub price: f64,
}

/// Single-choice customization axis (e.g., size)
///
/// Invariant: when `required` is true, a valid cart line for this product
/// carries exactly one selection from this group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub required: bool,
    pub options: Vec<VariantOption>,
}

/// Multi-choice customization option (embedded in ExtraGroup)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraOption {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Multi-choice customization axis (e.g., toppings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraGroup {
    pub id: String,
    pub name: String,
    /// Max selections (None = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_select: Option<i32>,
    pub options: Vec<ExtraOption>,
}

/// Catalog product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category reference (display string)
    pub category: String,
    pub base_price: f64,
    pub image: String,
    #[serde(default)]
    pub variants: Vec<VariantGroup>,
    #[serde(default)]
    pub extras: Vec<ExtraGroup>,
}
