//! Cart Models
//!
//! Cart lines carry denormalized price snapshots: a selection copies the
//! option's name and price at the moment it is made, so later catalog
//! edits never change what an existing line costs.

use serde::{Deserialize, Serialize};

/// Option selection snapshot (captured by value at selection time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub group_id: String,
    pub group_name: String,
    pub option_id: String,
    pub name: String,
    pub price: f64,
}

/// One priced, quantified, customized cart line
///
/// `cart_item_id` is the line's stable identity: editing a line keeps its
/// id, and two lines with identical content are still distinct lines.
/// `product_id` is a weak reference — the product may have left the
/// catalog since the line was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub cart_item_id: String,
    pub product_id: String,
    pub name: String,
    /// Base price snapshot taken when the line was created
    pub base_price: f64,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub variant_selections: Vec<SelectedOption>,
    #[serde(default)]
    pub extra_selections: Vec<SelectedOption>,
}
