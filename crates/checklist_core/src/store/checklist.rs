//! Checklist store facade.
//!
//! # Responsibility
//! - Own the authoritative record set, undo history, mode and observers.
//! - Route every mutation through one reversible command.
//!
//! # Invariants
//! - A mutation validates first; rejected calls push no command and notify
//!   nobody.
//! - An accepted mutation applies its effect exactly once (via the command)
//!   and then notifies exactly once.
//! - Reads return owned copies and never notify.

use crate::model::category::{Catalog, Category, CategoryId};
use crate::model::item::{
    validate_name, validate_quantity, Item, ItemId, ItemPatch, ItemValidationError, ResolvedItem,
};
use crate::notify::{Observer, Subject, SubscriptionId};
use crate::store::error::{StoreError, StoreResult};
use crate::store::seed::SeedConfig;
use crate::store::state::{ChecklistCommand, ChecklistState};
use crate::undo::UndoManager;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// UI mode gating the category editing surface. Not undoable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Normal,
    EditCategories,
}

/// Items of one category, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySection {
    pub category: Category,
    pub items: Vec<ResolvedItem>,
}

/// Everything an observer usually re-reads, captured in one pull.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSnapshot {
    pub items: Vec<ResolvedItem>,
    pub categories: Vec<Category>,
    pub mappings: BTreeMap<String, CategoryId>,
    pub mode: Mode,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Per-store monotonically increasing id source.
#[derive(Debug)]
struct IdGenerator {
    next: Option<ItemId>,
}

impl IdGenerator {
    /// Returns `None` once the id space is used up; ids are never recycled.
    fn allocate(&mut self) -> Option<ItemId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

/// Mutable checklist state core.
pub struct Checklist {
    state: ChecklistState,
    catalog: Catalog,
    history: UndoManager<ChecklistCommand>,
    mode: Mode,
    ids: IdGenerator,
    observers: Subject<Checklist>,
}

impl std::fmt::Debug for Checklist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checklist")
            .field("state", &self.state)
            .field("catalog", &self.catalog)
            .field("mode", &self.mode)
            .field("can_undo", &self.history.can_undo())
            .field("can_redo", &self.history.can_redo())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Checklist {
    /// Builds a store from seed config.
    ///
    /// # Errors
    /// - `Catalog` when the fallback is missing or category ids collide.
    /// - `Validation`/`Seed`/`UnknownCategory` for invalid sample data.
    pub fn new(config: SeedConfig) -> StoreResult<Self> {
        let catalog = config.catalog()?;
        config.validate_pool()?;

        let items = config.pick_items();
        let first_free_id = config.first_free_id()?;
        info!(
            "event=store_init module=store status=ok items={} categories={} mappings={} next_id={}",
            items.len(),
            catalog.categories().len(),
            config.mappings.len(),
            first_free_id
        );

        Ok(Self {
            state: ChecklistState::new(items, config.mappings),
            catalog,
            history: UndoManager::new(),
            mode: Mode::Normal,
            ids: IdGenerator {
                next: Some(first_free_id),
            },
            observers: Subject::new(),
        })
    }

    /// Store with the given catalog and no items or mappings.
    pub fn with_catalog(catalog: &Catalog) -> StoreResult<Self> {
        Self::new(SeedConfig::empty(catalog))
    }

    // Subscriptions

    /// Registers `observer` and immediately invokes it once.
    pub fn subscribe(&mut self, observer: impl Observer<Checklist> + 'static) -> SubscriptionId {
        let id = self.observers.subscribe(Box::new(observer));
        debug!(
            "event=subscribe module=store subscription_id={} observers={}",
            id.value(),
            self.observers.len()
        );
        self.observers.notify_one(id, self);
        id
    }

    /// Removes a subscription. Unknown ids are a no-op returning `false`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self) {
        self.observers.notify(self);
    }

    // Undo/redo

    /// Reverses the latest command. Notifies only when something was undone.
    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.state);
        debug!(
            "event=undo module=store applied={applied} history={} future={}",
            self.history.history_len(),
            self.history.future_len()
        );
        if applied {
            self.notify();
        }
        applied
    }

    /// Re-applies the latest undone command. Notifies only when something was redone.
    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.state);
        debug!(
            "event=redo module=store applied={applied} history={} future={}",
            self.history.history_len(),
            self.history.future_len()
        );
        if applied {
            self.notify();
        }
        applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Mode

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn enter_edit_categories_mode(&mut self) {
        self.set_mode(Mode::EditCategories);
    }

    pub fn exit_edit_categories_mode(&mut self) {
        self.set_mode(Mode::Normal);
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        debug!("event=mode_change module=store mode={mode:?}");
        self.notify();
    }

    // Reads

    pub fn get_item(&self, id: ItemId) -> Option<Item> {
        self.state.item(id).cloned()
    }

    /// All items in display order, each with its effective category.
    pub fn all_items(&self) -> Vec<ResolvedItem> {
        let fallback = self.catalog.fallback_category_id();
        self.state
            .items()
            .iter()
            .map(|item| item.resolve(self.state.resolve_category(&item.name, fallback)))
            .collect()
    }

    pub fn all_categories(&self) -> Vec<Category> {
        self.catalog.categories().to_vec()
    }

    pub fn all_mappings(&self) -> BTreeMap<String, CategoryId> {
        self.state.mappings().clone()
    }

    pub fn fallback_category_id(&self) -> CategoryId {
        self.catalog.fallback_category_id()
    }

    /// Items grouped per catalog category, in catalog order.
    ///
    /// Sections without items are omitted. Items sort case-insensitively by
    /// name, then by id.
    pub fn category_sections(&self) -> Vec<CategorySection> {
        let items = self.all_items();
        self.catalog
            .categories()
            .iter()
            .filter_map(|category| {
                let mut section_items: Vec<ResolvedItem> = items
                    .iter()
                    .filter(|item| item.category_id == category.id)
                    .cloned()
                    .collect();
                if section_items.is_empty() {
                    return None;
                }
                section_items.sort_by(|a, b| {
                    a.name
                        .to_lowercase()
                        .cmp(&b.name.to_lowercase())
                        .then_with(|| a.id.cmp(&b.id))
                });
                Some(CategorySection {
                    category: category.clone(),
                    items: section_items,
                })
            })
            .collect()
    }

    pub fn snapshot(&self) -> ChecklistSnapshot {
        ChecklistSnapshot {
            items: self.all_items(),
            categories: self.all_categories(),
            mappings: self.all_mappings(),
            mode: self.mode,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    // Mutations

    /// Adds `quantity` of `name`.
    ///
    /// An existing item with the same (trimmed) name has its quantity merged;
    /// otherwise a new item is appended and the name gains a mapping entry
    /// if it had none. Returns the affected item id.
    pub fn create_item(&mut self, name: &str, quantity: u32) -> StoreResult<ItemId> {
        let name = name.trim();
        if let Err(err) = validate_name(name).and_then(|()| validate_quantity(quantity)) {
            warn!("event=item_create module=store status=rejected reason={err:?}");
            return Err(err.into());
        }

        if let Some(existing) = self.state.find_by_name(name) {
            let item_id = existing.id;
            let before = existing.quantity;
            let Some(after) = before.checked_add(quantity) else {
                warn!(
                    "event=item_merge module=store status=rejected reason=quantity_overflow item_id={item_id}"
                );
                return Err(ItemValidationError::QuantityOverflow.into());
            };
            let command = ChecklistCommand::MergeQuantity {
                item_id,
                before,
                after,
            };
            self.apply(command);
            debug!("event=item_merge module=store status=ok item_id={item_id}");
            self.notify();
            return Ok(item_id);
        }

        let Some(item_id) = self.ids.allocate() else {
            warn!("event=item_create module=store status=rejected reason=ids_exhausted");
            return Err(StoreError::IdsExhausted);
        };
        let created_mapping = if self.state.mappings().contains_key(name) {
            None
        } else {
            Some(self.catalog.fallback_category_id())
        };
        self.apply(ChecklistCommand::InsertItem {
            item: Item::new(item_id, name, quantity),
            created_mapping,
        });
        debug!(
            "event=item_create module=store status=ok item_id={item_id} mapping_created={}",
            created_mapping.is_some()
        );
        self.notify();
        Ok(item_id)
    }

    /// Shallow-merges `patch` onto the item with `id`.
    ///
    /// Undo restores the full prior record. Renaming does not touch the
    /// category mapping. An empty patch changes nothing: no command is
    /// recorded and nobody is notified.
    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> StoreResult<()> {
        let Some(before) = self.state.item(id).cloned() else {
            warn!("event=item_update module=store status=rejected reason=not_found item_id={id}");
            return Err(StoreError::ItemNotFound(id));
        };
        if let Err(err) = patch.validate() {
            warn!("event=item_update module=store status=rejected reason={err:?} item_id={id}");
            return Err(err.into());
        }
        if patch.is_empty() {
            debug!(
                "event=item_update module=store status=skipped reason=empty_patch item_id={id}"
            );
            return Ok(());
        }

        let after = patch.apply_to(&before);
        self.apply(ChecklistCommand::ReplaceItem { before, after });
        debug!("event=item_update module=store status=ok item_id={id}");
        self.notify();
        Ok(())
    }

    /// Points the mapping entry for `name` at `category_id`.
    pub fn update_item_category(&mut self, name: &str, category_id: CategoryId) -> StoreResult<()> {
        let Some(before) = self.state.mappings().get(name).copied() else {
            warn!("event=mapping_update module=store status=rejected reason=mapping_not_found");
            return Err(StoreError::MappingNotFound(name.to_string()));
        };
        if !self.catalog.contains(category_id) {
            warn!(
                "event=mapping_update module=store status=rejected reason=unknown_category category_id={category_id}"
            );
            return Err(StoreError::UnknownCategory(category_id));
        }

        self.apply(ChecklistCommand::SetMapping {
            name: name.to_string(),
            before,
            after: category_id,
        });
        debug!("event=mapping_update module=store status=ok category_id={category_id}");
        self.notify();
        Ok(())
    }

    /// Removes the item; undo re-inserts it at its original position.
    pub fn delete_item(&mut self, id: ItemId) -> StoreResult<()> {
        let Some(index) = self.state.position(id) else {
            warn!("event=item_delete module=store status=rejected reason=not_found item_id={id}");
            return Err(StoreError::ItemNotFound(id));
        };
        let item = self.state.items()[index].clone();

        self.apply(ChecklistCommand::RemoveItem { index, item });
        debug!("event=item_delete module=store status=ok item_id={id} index={index}");
        self.notify();
        Ok(())
    }

    fn apply(&mut self, command: ChecklistCommand) {
        let kind = command.kind();
        self.history.execute(command, &mut self.state);
        debug!(
            "event=command_execute module=store kind={kind} history={}",
            self.history.history_len()
        );
    }
}
