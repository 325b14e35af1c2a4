//! Carta storefront engine
//!
//! Pricing, cart state and order composition for a digital menu
//! storefront: catalog item + selected options become a priced cart line,
//! the cart aggregates into a subtotal, the order is validated per
//! fulfillment type, and the final order is rendered as a WhatsApp message
//! plus its deep-link URL. There is no backend: persistence is a local
//! key-value store and the handoff URL is the only outward contract.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod ids;
pub mod message;
pub mod money;
pub mod schedule;
pub mod selection;
