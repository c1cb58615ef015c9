//! Authoritative record set and the snapshot commands that mutate it.
//!
//! # Invariants
//! - `ChecklistState` is only mutated through `ChecklistCommand`.
//! - Every command variant carries full before/after values, so `reverse`
//!   never derives the prior state from the current one.

use crate::model::category::CategoryId;
use crate::model::item::{Item, ItemId};
use crate::undo::Command;
use std::collections::BTreeMap;

/// Live item list and name→category mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ChecklistState {
    items: Vec<Item>,
    mappings: BTreeMap<String, CategoryId>,
}

impl ChecklistState {
    pub(crate) fn new(items: Vec<Item>, mappings: BTreeMap<String, CategoryId>) -> Self {
        Self { items, mappings }
    }

    pub(crate) fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn mappings(&self) -> &BTreeMap<String, CategoryId> {
        &self.mappings
    }

    pub(crate) fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub(crate) fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub(crate) fn resolve_category(&self, name: &str, fallback: CategoryId) -> CategoryId {
        self.mappings.get(name).copied().unwrap_or(fallback)
    }

    fn replace(&mut self, replacement: &Item) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id == replacement.id) {
            *slot = replacement.clone();
        }
    }

    fn set_quantity(&mut self, id: ItemId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    fn remove(&mut self, id: ItemId) {
        self.items.retain(|item| item.id != id);
    }

    fn insert_at(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }
}

/// One reversible checklist mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChecklistCommand {
    /// Re-adding an existing name bumps its quantity.
    MergeQuantity {
        item_id: ItemId,
        before: u32,
        after: u32,
    },
    /// Appends a fresh item. `created_mapping` is set only when the name had
    /// no mapping entry before this command.
    InsertItem {
        item: Item,
        created_mapping: Option<CategoryId>,
    },
    ReplaceItem {
        before: Item,
        after: Item,
    },
    SetMapping {
        name: String,
        before: CategoryId,
        after: CategoryId,
    },
    RemoveItem {
        index: usize,
        item: Item,
    },
}

impl ChecklistCommand {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::MergeQuantity { .. } => "merge_quantity",
            Self::InsertItem { .. } => "insert_item",
            Self::ReplaceItem { .. } => "replace_item",
            Self::SetMapping { .. } => "set_mapping",
            Self::RemoveItem { .. } => "remove_item",
        }
    }
}

impl Command for ChecklistCommand {
    type Target = ChecklistState;

    fn forward(&self, state: &mut ChecklistState) {
        match self {
            Self::MergeQuantity { item_id, after, .. } => state.set_quantity(*item_id, *after),
            Self::InsertItem {
                item,
                created_mapping,
            } => {
                state.items.push(item.clone());
                if let Some(category_id) = created_mapping {
                    state.mappings.insert(item.name.clone(), *category_id);
                }
            }
            Self::ReplaceItem { after, .. } => state.replace(after),
            Self::SetMapping { name, after, .. } => {
                state.mappings.insert(name.clone(), *after);
            }
            Self::RemoveItem { item, .. } => state.remove(item.id),
        }
    }

    fn reverse(&self, state: &mut ChecklistState) {
        match self {
            Self::MergeQuantity {
                item_id, before, ..
            } => state.set_quantity(*item_id, *before),
            Self::InsertItem {
                item,
                created_mapping,
            } => {
                state.remove(item.id);
                if created_mapping.is_some() {
                    state.mappings.remove(&item.name);
                }
            }
            Self::ReplaceItem { before, .. } => state.replace(before),
            Self::SetMapping { name, before, .. } => {
                state.mappings.insert(name.clone(), *before);
            }
            Self::RemoveItem { index, item } => state.insert_at(*index, item.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChecklistCommand, ChecklistState};
    use crate::model::item::Item;
    use crate::undo::Command;
    use std::collections::BTreeMap;

    fn abc() -> ChecklistState {
        ChecklistState::new(
            vec![
                Item::new(1, "A", 1),
                Item::new(2, "B", 1),
                Item::new(3, "C", 1),
            ],
            BTreeMap::new(),
        )
    }

    #[test]
    fn remove_reverse_restores_original_index() {
        let mut state = abc();
        let before = state.clone();
        let command = ChecklistCommand::RemoveItem {
            index: 1,
            item: Item::new(2, "B", 1),
        };

        command.forward(&mut state);
        let ids: Vec<_> = state.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3]);

        command.reverse(&mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn insert_reverse_keeps_preexisting_mapping() {
        let mut mappings = BTreeMap::new();
        mappings.insert("Milk".to_string(), 1);
        let mut state = ChecklistState::new(Vec::new(), mappings);
        let command = ChecklistCommand::InsertItem {
            item: Item::new(5, "Milk", 2),
            created_mapping: None,
        };

        command.forward(&mut state);
        command.reverse(&mut state);

        assert!(state.items().is_empty());
        assert_eq!(state.mappings().get("Milk"), Some(&1));
    }

    #[test]
    fn insert_reverse_drops_created_mapping() {
        let mut state = ChecklistState::default();
        let command = ChecklistCommand::InsertItem {
            item: Item::new(5, "Kiwi", 1),
            created_mapping: Some(0),
        };

        command.forward(&mut state);
        assert_eq!(state.mappings().get("Kiwi"), Some(&0));

        command.reverse(&mut state);
        assert!(state.mappings().is_empty());
    }

    #[test]
    fn replace_reverse_restores_full_snapshot() {
        let mut state = abc();
        let before = Item::new(2, "B", 1);
        let mut after = Item::new(2, "Bee", 4);
        after.bought = true;
        let command = ChecklistCommand::ReplaceItem {
            before: before.clone(),
            after: after.clone(),
        };

        command.forward(&mut state);
        assert_eq!(state.item(2), Some(&after));
        command.reverse(&mut state);
        assert_eq!(state.item(2), Some(&before));
    }
}
