//! Category reference data.
//!
//! # Responsibility
//! - Define category records and the validated catalog that owns them.
//!
//! # Invariants
//! - Category ids are unique inside one catalog.
//! - The fallback id always names a category in the catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CategoryId = u32;

/// Display category an item name can be mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Single glyph shown next to the name.
    pub icon: String,
    pub name: String,
    /// CSS colour string, e.g. `hsl(220, 75%, 75%)`.
    pub colour: String,
}

impl Category {
    pub fn new(
        id: CategoryId,
        icon: impl Into<String>,
        name: impl Into<String>,
        colour: impl Into<String>,
    ) -> Self {
        Self {
            id,
            icon: icon.into(),
            name: name.into(),
            colour: colour.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    MissingFallback(CategoryId),
    DuplicateCategoryId(CategoryId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFallback(id) => {
                write!(f, "fallback category {id} is not in the catalog")
            }
            Self::DuplicateCategoryId(id) => write!(f, "duplicate category id: {id}"),
        }
    }
}

impl Error for CatalogError {}

/// Static category set for one store session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    fallback_category_id: CategoryId,
}

impl Catalog {
    /// Builds a catalog, keeping the given display order.
    pub fn new(
        categories: Vec<Category>,
        fallback_category_id: CategoryId,
    ) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for category in &categories {
            if !seen.insert(category.id) {
                return Err(CatalogError::DuplicateCategoryId(category.id));
            }
        }
        if !seen.contains(&fallback_category_id) {
            return Err(CatalogError::MissingFallback(fallback_category_id));
        }

        Ok(Self {
            categories,
            fallback_category_id,
        })
    }

    pub fn fallback_category_id(&self) -> CategoryId {
        self.fallback_category_id
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }
}
