//! Data models for the Carta storefront

pub mod cart;
pub mod config;
pub mod menu;
pub mod order;

pub use cart::{CartItem, SelectedOption};
pub use config::{Config, OrderTypesEnabled, ScheduleConfig, ScheduleDay};
pub use menu::{ExtraGroup, ExtraOption, MenuItem, VariantGroup, VariantOption};
pub use order::{OrderDetails, OrderType};
