//! Cart service - the session's cart lines with write-through persistence
//!
//! The in-memory list is the source of truth for the current session;
//! persistence is best-effort durability. A failed write logs a warning
//! and never rolls back the mutation, and unreadable prior state loads as
//! an empty cart.

mod storage;

pub use storage::{CartStorage, MemoryStorage, RedbCartStorage, StorageError, StorageResult};

use crate::money;
use rust_decimal::Decimal;
use shared::models::CartItem;
use std::sync::Arc;

/// Namespace key the cart list is persisted under
pub const CART_STORE_KEY: &str = "menu-cart";

/// Session cart: ordered lines (insertion order = display order)
pub struct CartService {
    items: Vec<CartItem>,
    storage: Arc<dyn CartStorage>,
}

impl CartService {
    /// Create the service over an injected store, loading any prior state.
    /// Absent or corrupt state yields an empty cart.
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        let items = match storage.get(CART_STORE_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(items) => items,
                Err(error) => {
                    tracing::warn!(%error, "stored cart is unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "cart storage unavailable, starting empty");
                Vec::new()
            }
        };
        tracing::info!(lines = items.len(), "cart service ready");
        Self { items, storage }
    }

    /// Convenience constructor for storage-less sessions
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart subtotal via the pricing engine
    pub fn subtotal(&self) -> Decimal {
        money::cart_subtotal(&self.items)
    }

    /// Append a line. Lines are never merged: adding the same product with
    /// the same selections twice keeps two distinct lines.
    pub fn add_item(&mut self, item: CartItem) {
        tracing::debug!(cart_item_id = %item.cart_item_id, "cart line added");
        self.items.push(item);
        self.persist();
    }

    /// Replace the line with the same `cart_item_id`; no-op when absent
    pub fn update_item(&mut self, updated: CartItem) {
        let Some(slot) = self
            .items
            .iter_mut()
            .find(|item| item.cart_item_id == updated.cart_item_id)
        else {
            return;
        };
        tracing::debug!(cart_item_id = %updated.cart_item_id, "cart line updated");
        *slot = updated;
        self.persist();
    }

    /// Delete the line with the given id; no-op when absent
    pub fn remove_item(&mut self, cart_item_id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.cart_item_id != cart_item_id);
        if self.items.len() != before {
            tracing::debug!(cart_item_id, "cart line removed");
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Write through the full list. Fire-and-forget: a failure leaves the
    /// in-memory list authoritative for the rest of the session.
    fn persist(&self) {
        let result = serde_json::to_vec(&self.items)
            .map_err(StorageError::from)
            .and_then(|bytes| self.storage.set(CART_STORE_KEY, &bytes));
        if let Err(error) = result {
            tracing::warn!(%error, "cart persistence failed, continuing in memory");
        }
    }
}
