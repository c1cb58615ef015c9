//! Checklist item domain model.
//!
//! # Responsibility
//! - Define the canonical item record owned by the store.
//! - Provide the partial-update shape used by `update_item`.
//!
//! # Invariants
//! - `id` is unique within one store and never reused.
//! - `name` is non-blank; it is the join key into the category mapping.
//! - `quantity` is at least 1.
//! - Category is never stored on the item; see `ResolvedItem`.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable per-store item identifier.
pub type ItemId = u64;

/// Validation errors for item records and patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Name is empty or whitespace only.
    BlankName,
    /// Quantity is below the minimum of 1.
    ZeroQuantity,
    /// Merging quantities would exceed `u32::MAX`.
    QuantityOverflow,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "item name must not be blank"),
            Self::ZeroQuantity => write!(f, "item quantity must be at least 1"),
            Self::QuantityOverflow => write!(f, "merged item quantity is too large"),
        }
    }
}

impl Error for ItemValidationError {}

/// Authoritative item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub bought: bool,
}

impl Item {
    /// Creates a not-yet-bought item.
    pub fn new(id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            bought: false,
        }
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        validate_name(&self.name)?;
        validate_quantity(self.quantity)
    }

    /// Attaches a resolved category for read snapshots.
    pub fn resolve(&self, category_id: CategoryId) -> ResolvedItem {
        ResolvedItem {
            id: self.id,
            name: self.name.clone(),
            quantity: self.quantity,
            bought: self.bought,
            category_id,
        }
    }
}

/// Read-side item view with its effective category injected.
///
/// Produced fresh on every read; mutating it has no effect on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub bought: bool,
    pub category_id: CategoryId,
}

/// Shallow partial update for an item.
///
/// `None` fields are left untouched by `apply_to`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub bought: Option<bool>,
}

impl ItemPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn bought(bought: bool) -> Self {
        Self {
            bought: Some(bought),
            ..Self::default()
        }
    }

    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.bought.is_none()
    }

    /// Validates only the fields that are present.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        Ok(())
    }

    /// Produces the merged record. Names are stored trimmed.
    pub fn apply_to(&self, item: &Item) -> Item {
        Item {
            id: item.id,
            name: self
                .name
                .as_deref()
                .map(|name| name.trim().to_string())
                .unwrap_or_else(|| item.name.clone()),
            quantity: self.quantity.unwrap_or(item.quantity),
            bought: self.bought.unwrap_or(item.bought),
        }
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ItemValidationError> {
    if name.trim().is_empty() {
        return Err(ItemValidationError::BlankName);
    }
    Ok(())
}

pub(crate) fn validate_quantity(quantity: u32) -> Result<(), ItemValidationError> {
    if quantity == 0 {
        return Err(ItemValidationError::ZeroQuantity);
    }
    Ok(())
}
