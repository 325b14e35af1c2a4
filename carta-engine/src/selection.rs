//! Option selection builder
//!
//! `ItemCustomizer` holds the in-progress customization state for one
//! product: the variant choice per group, the ordered extra choices per
//! group, quantity and notes. In-progress state may be invalid (missing
//! required choices, ids that no longer resolve against the catalog) —
//! that is held without complaint; only the confirm action is gated.
//!
//! The extra-toggle cap check and the per-group error bookkeeping are two
//! separate transitions: `apply_extra_toggle` mutates one group's
//! selection list, and the customizer records or clears the group's error
//! from the returned outcome.

use crate::ids::IdGenerator;
use shared::models::{CartItem, MenuItem, SelectedOption, VariantGroup};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors gating the confirm action
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selecciona una opcion en cada grupo requerido.")]
    MissingRequiredVariant,
}

/// Outcome of toggling one extra option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraToggle {
    Added,
    Removed,
    /// The toggle-on was rejected; the selection list is unchanged
    LimitReached,
}

/// Pure transition: toggle `option_id` within one group's ordered selection
/// list. Toggling off always succeeds; toggling on is rejected when the
/// list already holds `max_select` entries.
pub fn apply_extra_toggle(
    selected: &mut Vec<String>,
    option_id: &str,
    max_select: Option<i32>,
) -> ExtraToggle {
    if let Some(pos) = selected.iter().position(|id| id == option_id) {
        selected.remove(pos);
        return ExtraToggle::Removed;
    }
    if let Some(max) = max_select {
        if selected.len() as i32 >= max {
            return ExtraToggle::LimitReached;
        }
    }
    selected.push(option_id.to_string());
    ExtraToggle::Added
}

/// In-progress customization of one catalog product
pub struct ItemCustomizer {
    product: MenuItem,
    /// Set in edit mode; confirm reuses it instead of allocating
    existing_id: Option<String>,
    quantity: i32,
    notes: String,
    variant_choices: HashMap<String, String>,
    extra_choices: HashMap<String, Vec<String>>,
    extra_errors: HashMap<String, String>,
    ids: Arc<dyn IdGenerator>,
}

impl ItemCustomizer {
    /// Start customizing a product (create mode)
    pub fn new(product: MenuItem, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            product,
            existing_id: None,
            quantity: 1,
            notes: String::new(),
            variant_choices: HashMap::new(),
            extra_choices: HashMap::new(),
            extra_errors: HashMap::new(),
            ids,
        }
    }

    /// Reopen an existing cart line for editing; selection maps are
    /// reconstructed from the line's snapshots and confirm keeps its id.
    pub fn edit(product: MenuItem, item: &CartItem, ids: Arc<dyn IdGenerator>) -> Self {
        let mut customizer = Self::new(product, ids);
        customizer.existing_id = Some(item.cart_item_id.clone());
        customizer.quantity = item.quantity.max(1);
        customizer.notes = item.notes.clone().unwrap_or_default();
        for selection in &item.variant_selections {
            customizer
                .variant_choices
                .insert(selection.group_id.clone(), selection.option_id.clone());
        }
        for selection in &item.extra_selections {
            customizer
                .extra_choices
                .entry(selection.group_id.clone())
                .or_default()
                .push(selection.option_id.clone());
        }
        customizer
    }

    pub fn product(&self) -> &MenuItem {
        &self.product
    }

    // ========================================================================
    // Variant choices
    // ========================================================================

    /// Choose an option for a variant group (overwrites any prior choice)
    pub fn select_variant(&mut self, group_id: &str, option_id: &str) {
        self.variant_choices
            .insert(group_id.to_string(), option_id.to_string());
    }

    pub fn variant_choice(&self, group_id: &str) -> Option<&str> {
        self.variant_choices.get(group_id).map(String::as_str)
    }

    fn variant_resolves(&self, group: &VariantGroup) -> bool {
        self.variant_choices
            .get(&group.id)
            .is_some_and(|choice| group.options.iter().any(|option| &option.id == choice))
    }

    /// True while some required variant group has no choice that resolves
    /// to a real option. Confirm is blocked until this clears.
    pub fn missing_required_variant(&self) -> bool {
        self.product
            .variants
            .iter()
            .any(|group| group.required && !self.variant_resolves(group))
    }

    // ========================================================================
    // Extra choices
    // ========================================================================

    /// Toggle an extra option. Rejected toggles record a group-scoped error
    /// message; any successful toggle clears it.
    pub fn toggle_extra(&mut self, group_id: &str, option_id: &str) -> ExtraToggle {
        let max_select = self
            .product
            .extras
            .iter()
            .find(|group| group.id == group_id)
            .and_then(|group| group.max_select);

        let selected = self.extra_choices.entry(group_id.to_string()).or_default();
        let outcome = apply_extra_toggle(selected, option_id, max_select);

        match outcome {
            ExtraToggle::LimitReached => {
                let max = max_select.unwrap_or_default();
                self.extra_errors.insert(
                    group_id.to_string(),
                    format!("Maximo {} seleccion(es).", max),
                );
            }
            ExtraToggle::Added | ExtraToggle::Removed => {
                self.extra_errors.remove(group_id);
            }
        }
        outcome
    }

    /// Current error message for one extra group, if its last toggle was
    /// rejected
    pub fn extra_error(&self, group_id: &str) -> Option<&str> {
        self.extra_errors.get(group_id).map(String::as_str)
    }

    pub fn is_extra_selected(&self, group_id: &str, option_id: &str) -> bool {
        self.extra_choices
            .get(group_id)
            .is_some_and(|selected| selected.iter().any(|id| id == option_id))
    }

    // ========================================================================
    // Quantity and notes
    // ========================================================================

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn increment_quantity(&mut self) {
        self.quantity += 1;
    }

    /// Decrement, clamped at 1
    pub fn decrement_quantity(&mut self) {
        self.quantity = (self.quantity - 1).max(1);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    // ========================================================================
    // Building the cart line
    // ========================================================================

    fn build_variant_selections(&self) -> Vec<SelectedOption> {
        self.product
            .variants
            .iter()
            .filter_map(|group| {
                let choice = self.variant_choices.get(&group.id)?;
                let option = group.options.iter().find(|option| &option.id == choice)?;
                Some(SelectedOption {
                    group_id: group.id.clone(),
                    group_name: group.name.clone(),
                    option_id: option.id.clone(),
                    name: option.name.clone(),
                    price: option.price,
                })
            })
            .collect()
    }

    fn build_extra_selections(&self) -> Vec<SelectedOption> {
        self.product
            .extras
            .iter()
            .flat_map(|group| {
                let chosen = self.extra_choices.get(&group.id);
                chosen
                    .into_iter()
                    .flatten()
                    .filter_map(|option_id| {
                        let option = group.options.iter().find(|option| &option.id == option_id)?;
                        Some(SelectedOption {
                            group_id: group.id.clone(),
                            group_name: group.name.clone(),
                            option_id: option.id.clone(),
                            name: option.name.clone(),
                            price: option.price,
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn assemble(&self, cart_item_id: String) -> CartItem {
        let notes = self.notes.trim();
        CartItem {
            cart_item_id,
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            base_price: self.product.base_price,
            quantity: self.quantity,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            variant_selections: self.build_variant_selections(),
            extra_selections: self.build_extra_selections(),
        }
    }

    /// The would-be cart line, for live price display. Never allocates an
    /// id: edit mode shows the real id, create mode a placeholder.
    pub fn preview(&self) -> CartItem {
        let id = self
            .existing_id
            .clone()
            .unwrap_or_else(|| "preview".to_string());
        self.assemble(id)
    }

    /// Emit the cart line. Create mode draws a fresh id; edit mode reuses
    /// the original one so the line keeps its identity.
    pub fn confirm(&self) -> Result<CartItem, SelectionError> {
        if self.missing_required_variant() {
            return Err(SelectionError::MissingRequiredVariant);
        }
        let id = self
            .existing_id
            .clone()
            .unwrap_or_else(|| self.ids.next_id());
        Ok(self.assemble(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{to_f64, unit_price};
    use shared::models::{ExtraGroup, ExtraOption, VariantOption};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SeqIds(AtomicUsize);

    impl SeqIds {
        fn new() -> Arc<Self> {
            Arc::new(Self(AtomicUsize::new(0)))
        }

        fn issued(&self) -> usize {
            self.0.load(Ordering::Relaxed)
        }
    }

    impl IdGenerator for SeqIds {
        fn next_id(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::Relaxed))
        }
    }

    fn pizza() -> MenuItem {
        MenuItem {
            id: "pizza".to_string(),
            name: "Pizza Artesanal".to_string(),
            description: None,
            category: "Pizzas".to_string(),
            base_price: 20.0,
            image: String::new(),
            variants: vec![VariantGroup {
                id: "size".to_string(),
                name: "Tamano".to_string(),
                required: true,
                options: vec![
                    VariantOption {
                        id: "m".to_string(),
                        name: "Mediana".to_string(),
                        price: 0.0,
                    },
                    VariantOption {
                        id: "f".to_string(),
                        name: "Familiar".to_string(),
                        price: 8.0,
                    },
                ],
            }],
            extras: vec![ExtraGroup {
                id: "top".to_string(),
                name: "Toppings".to_string(),
                max_select: Some(2),
                options: vec![
                    ExtraOption {
                        id: "queso".to_string(),
                        name: "Queso extra".to_string(),
                        price: 3.0,
                    },
                    ExtraOption {
                        id: "champi".to_string(),
                        name: "Champinones".to_string(),
                        price: 2.5,
                    },
                    ExtraOption {
                        id: "aceituna".to_string(),
                        name: "Aceitunas".to_string(),
                        price: 1.5,
                    },
                ],
            }],
        }
    }

    #[test]
    fn confirm_blocked_until_required_variant_chosen() {
        let mut customizer = ItemCustomizer::new(pizza(), SeqIds::new());
        assert!(customizer.missing_required_variant());
        assert_eq!(
            customizer.confirm(),
            Err(SelectionError::MissingRequiredVariant)
        );

        customizer.select_variant("size", "f");
        assert!(!customizer.missing_required_variant());
        let item = customizer.confirm().unwrap();
        assert_eq!(item.variant_selections[0].name, "Familiar");
        assert_eq!(to_f64(unit_price(&item)), 28.0);
    }

    #[test]
    fn stale_variant_choice_does_not_satisfy_the_gate() {
        let mut customizer = ItemCustomizer::new(pizza(), SeqIds::new());
        customizer.select_variant("size", "gone");
        assert!(customizer.missing_required_variant());
    }

    #[test]
    fn toggle_beyond_cap_is_rejected_with_group_error() {
        let mut customizer = ItemCustomizer::new(pizza(), SeqIds::new());
        assert_eq!(customizer.toggle_extra("top", "queso"), ExtraToggle::Added);
        assert_eq!(customizer.toggle_extra("top", "champi"), ExtraToggle::Added);
        assert_eq!(
            customizer.toggle_extra("top", "aceituna"),
            ExtraToggle::LimitReached
        );
        assert_eq!(
            customizer.extra_error("top"),
            Some("Maximo 2 seleccion(es).")
        );
        assert!(!customizer.is_extra_selected("top", "aceituna"));

        // Toggling off always succeeds and clears the error
        assert_eq!(
            customizer.toggle_extra("top", "queso"),
            ExtraToggle::Removed
        );
        assert_eq!(customizer.extra_error("top"), None);
        assert_eq!(
            customizer.toggle_extra("top", "aceituna"),
            ExtraToggle::Added
        );
    }

    #[test]
    fn extra_selections_keep_insertion_order() {
        let mut customizer = ItemCustomizer::new(pizza(), SeqIds::new());
        customizer.select_variant("size", "m");
        customizer.toggle_extra("top", "champi");
        customizer.toggle_extra("top", "queso");

        let item = customizer.confirm().unwrap();
        let names: Vec<&str> = item
            .extra_selections
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Champinones", "Queso extra"]);
    }

    #[test]
    fn unresolved_selection_references_emit_nothing() {
        let mut item_with_ghosts = ItemCustomizer::new(pizza(), SeqIds::new());
        item_with_ghosts.select_variant("size", "m");
        item_with_ghosts.toggle_extra("top", "removed-topping");
        item_with_ghosts.toggle_extra("ghost-group", "whatever");

        let item = item_with_ghosts.confirm().unwrap();
        assert!(item.extra_selections.is_empty());
    }

    #[test]
    fn quantity_decrement_clamps_at_one() {
        let mut customizer = ItemCustomizer::new(pizza(), SeqIds::new());
        customizer.decrement_quantity();
        assert_eq!(customizer.quantity(), 1);
        customizer.increment_quantity();
        customizer.increment_quantity();
        customizer.decrement_quantity();
        assert_eq!(customizer.quantity(), 2);
    }

    #[test]
    fn blank_notes_become_none() {
        let mut customizer = ItemCustomizer::new(pizza(), SeqIds::new());
        customizer.select_variant("size", "m");
        customizer.set_notes("   ");
        assert_eq!(customizer.confirm().unwrap().notes, None);

        customizer.set_notes("  sin aji  ");
        assert_eq!(
            customizer.confirm().unwrap().notes.as_deref(),
            Some("sin aji")
        );
    }

    #[test]
    fn edit_mode_rebuilds_state_and_reuses_the_line_id() {
        let ids = SeqIds::new();
        let mut customizer = ItemCustomizer::new(pizza(), ids.clone());
        customizer.select_variant("size", "f");
        customizer.toggle_extra("top", "queso");
        customizer.increment_quantity();
        let original = customizer.confirm().unwrap();

        let mut editor = ItemCustomizer::edit(pizza(), &original, ids.clone());
        assert_eq!(editor.quantity(), 2);
        assert_eq!(editor.variant_choice("size"), Some("f"));
        assert!(editor.is_extra_selected("top", "queso"));

        editor.toggle_extra("top", "champi");
        let updated = editor.confirm().unwrap();
        assert_eq!(updated.cart_item_id, original.cart_item_id);
        assert_eq!(updated.extra_selections.len(), 2);
    }

    #[test]
    fn create_mode_allocates_distinct_ids() {
        let ids = SeqIds::new();
        let mut first = ItemCustomizer::new(pizza(), ids.clone());
        first.select_variant("size", "m");
        let mut second = ItemCustomizer::new(pizza(), ids.clone());
        second.select_variant("size", "m");

        let a = first.confirm().unwrap();
        let b = second.confirm().unwrap();
        assert_ne!(a.cart_item_id, b.cart_item_id);
    }

    #[test]
    fn preview_never_allocates_an_id() {
        let ids = SeqIds::new();
        let mut customizer = ItemCustomizer::new(pizza(), ids.clone());
        customizer.select_variant("size", "m");
        let _ = customizer.preview();
        let _ = customizer.preview();
        assert_eq!(ids.issued(), 0);
    }
}
