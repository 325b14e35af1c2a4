//! Shared types for the Carta storefront
//!
//! Common types used across the workspace: catalog entities, cart lines,
//! order details and business configuration, plus small time utilities.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
