use crate::model::category::{CatalogError, CategoryId};
use crate::model::item::{ItemId, ItemValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for rejected mutations and invalid seed data.
///
/// A rejected mutation never pushes a command and never notifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ItemValidationError),
    ItemNotFound(ItemId),
    /// Item name has no entry in the category mapping.
    MappingNotFound(String),
    UnknownCategory(CategoryId),
    /// Every item id has been issued; ids are never recycled.
    IdsExhausted,
    Catalog(CatalogError),
    Seed(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::MappingNotFound(name) => write!(f, "no category mapping for item `{name}`"),
            Self::UnknownCategory(id) => write!(f, "unknown category id: {id}"),
            Self::IdsExhausted => write!(f, "no item ids left to allocate"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Seed(message) => write!(f, "invalid seed config: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::ItemNotFound(_)
            | Self::MappingNotFound(_)
            | Self::UnknownCategory(_)
            | Self::IdsExhausted
            | Self::Seed(_) => None,
        }
    }
}

impl From<ItemValidationError> for StoreError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CatalogError> for StoreError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}
