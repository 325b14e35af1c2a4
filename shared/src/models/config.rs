//! Business Configuration Model
//!
//! Singleton, read-only configuration document loaded at startup.

use super::order::OrderType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Open interval for one weekday, "HH:MM" 24-hour local time, zero-padded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub start: String,
    pub end: String,
}

/// Per-weekday open/close table in the business's local calendar
///
/// `days` is keyed by weekday index "0"(Sunday).."6"(Saturday). An explicit
/// `null` entry marks the day closed; a missing entry means the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// IANA timezone identifier (e.g., "America/Lima")
    pub timezone: String,
    pub days: HashMap<String, Option<ScheduleDay>>,
}

/// Which fulfillment modes the business accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTypesEnabled {
    pub mesa: bool,
    pub pickup: bool,
    pub delivery: bool,
}

/// Business configuration entity (singleton)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub business_name: String,
    /// Destination for the order handoff; may contain formatting characters
    pub whatsapp_number: String,
    /// ISO currency code (e.g., "PEN")
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<f64>,
    /// Display string for opening hours (shown in the message footer)
    #[serde(default)]
    pub hours_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_text: Option<String>,
    /// When a table parameter arrives from outside, lock the field unless
    /// this is explicitly false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_table_from_url: Option<bool>,
    pub order_types_enabled: OrderTypesEnabled,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleConfig>,
}

impl Config {
    /// Enabled order types in mesa → pickup → delivery order.
    ///
    /// At least one type must be offered; when the configuration disables
    /// all three, table service is the enforced fallback.
    pub fn enabled_order_types(&self) -> Vec<OrderType> {
        let mut types = Vec::new();
        if self.order_types_enabled.mesa {
            types.push(OrderType::Mesa);
        }
        if self.order_types_enabled.pickup {
            types.push(OrderType::Pickup);
        }
        if self.order_types_enabled.delivery {
            types.push(OrderType::Delivery);
        }
        if types.is_empty() {
            types.push(OrderType::Mesa);
        }
        types
    }
}
