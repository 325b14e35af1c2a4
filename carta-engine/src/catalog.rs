//! Catalog and configuration documents
//!
//! Both documents are read once at startup and never mutated. The index
//! gives id lookup for cart edits and category order for the menu view.

use shared::models::{Config, MenuItem};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Document loading errors (startup-time only)
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the catalog document (ordered collection of menu items)
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<MenuItem>, CatalogError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Load the business configuration document
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, CatalogError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Catalog lookup: items in document order plus an id index
pub struct CatalogIndex {
    items: Vec<MenuItem>,
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let by_id = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();
        Self { items, by_id }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Weak lookup: a cart line may reference a product that has since
    /// left the catalog
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.by_id.get(id).map(|idx| &self.items[*idx])
    }

    /// Category names in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(item.category.as_str());
            }
        }
        seen
    }
}

/// Case-insensitive substring search over name and description
pub fn search_items<'a>(items: &'a [MenuItem], query: &str) -> Vec<&'a MenuItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Table-identity pass-through from the session's entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLock {
    pub table_number: Option<String>,
    /// When true, the table field is read-only and keeps the external value
    pub locked: bool,
}

/// A table parameter locks the field unless the configuration explicitly
/// opts out
pub fn resolve_table_lock(config: &Config, table_param: Option<&str>) -> TableLock {
    let table_number = table_param
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    let locked = table_number.is_some() && config.lock_table_from_url != Some(false);
    TableLock {
        table_number,
        locked,
    }
}
