//! Order Models
//!
//! Order details live only for the current composition step: created fresh
//! per session, mutated by the order form, never persisted.

use super::config::Config;
use serde::{Deserialize, Serialize};

/// Fulfillment mode, gating which contact fields are required
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Table service
    #[default]
    Mesa,
    /// Customer picks the order up
    Pickup,
    /// Courier delivery
    Delivery,
}

/// Contact details for the order being composed
///
/// Which fields are required depends on `order_type`; everything else is
/// optional free text. See the checkout validator for the rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_references: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<String>,
}

impl OrderDetails {
    /// Fresh details for a new session: first enabled order type, table
    /// number pre-filled from the external table parameter when present.
    pub fn for_session(config: &Config, table_param: Option<&str>) -> Self {
        Self {
            order_type: config
                .enabled_order_types()
                .first()
                .copied()
                .unwrap_or_default(),
            table_number: table_param.map(str::to_string),
            ..Self::default()
        }
    }
}
