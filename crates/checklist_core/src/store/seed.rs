//! Constructor-injected seed data for a new store.
//!
//! # Responsibility
//! - Describe the reference dataset a `Checklist` starts from.
//! - Pick the randomized starting subset and the first free item id.
//!
//! # Invariants
//! - Seed state is per store; nothing here is process-global.
//! - With `rng_seed` set, the starting subset is deterministic.

use crate::model::category::{Catalog, Category, CategoryId};
use crate::model::item::{Item, ItemId};
use crate::store::error::{StoreError, StoreResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const OTHER_CATEGORY_ID: CategoryId = 0;
const DEFAULT_SAMPLE_SIZE: usize = 3;

/// Reference dataset and sampling options for a new store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub categories: Vec<Category>,
    pub fallback_category_id: CategoryId,
    #[serde(default)]
    pub mappings: BTreeMap<String, CategoryId>,
    #[serde(default)]
    pub sample_items: Vec<Item>,
    /// Number of sample items the store starts with. Clamped to the pool size.
    /// Defaults to 3 when omitted from JSON.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        let categories = vec![
            Category::new(1, "🥛", "Dairy", "hsl(220, 75%, 75%)"),
            Category::new(2, "🧊", "Frozen", "hsl(220, 90%, 95%)"),
            Category::new(3, "🍌", "Fruit", "hsl(140, 75%, 75%)"),
            Category::new(OTHER_CATEGORY_ID, "🛒", "Other", "hsl(0, 0%, 90%)"),
        ];

        let samples: [(&str, u32, CategoryId); 11] = [
            ("Milk", 4, 1),
            ("Yogurt", 1, 1),
            ("Pizza", 1, 2),
            ("Eggs", 12, OTHER_CATEGORY_ID),
            ("Olive Oil", 1, OTHER_CATEGORY_ID),
            ("Cheese", 1, 1),
            ("Burritos", 4, 2),
            ("Waffles", 2, 2),
            ("Bananas", 6, 3),
            ("Apples", 3, 3),
            ("Oranges", 3, 3),
        ];

        let mut sample_items = Vec::with_capacity(samples.len());
        let mut mappings = BTreeMap::new();
        for (index, (name, quantity, category_id)) in samples.into_iter().enumerate() {
            sample_items.push(Item::new(index as ItemId + 1, name, quantity));
            mappings.insert(name.to_string(), category_id);
        }

        Self {
            categories,
            fallback_category_id: OTHER_CATEGORY_ID,
            mappings,
            sample_items,
            sample_size: DEFAULT_SAMPLE_SIZE,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    /// Config with the given catalog and no items or mappings.
    pub fn empty(catalog: &Catalog) -> Self {
        Self {
            categories: catalog.categories().to_vec(),
            fallback_category_id: catalog.fallback_category_id(),
            mappings: BTreeMap::new(),
            sample_items: Vec::new(),
            sample_size: 0,
            rng_seed: None,
        }
    }

    /// Parses a JSON seed config and validates it.
    pub fn from_json_str(input: &str) -> StoreResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| StoreError::Seed(format!("failed to parse seed json: {err}")))?;
        config.catalog()?;
        config.validate_pool()?;
        Ok(config)
    }

    /// Same config, but every sample item is used in its original order.
    pub fn with_all_samples(mut self) -> Self {
        self.sample_size = self.sample_items.len();
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub(crate) fn catalog(&self) -> StoreResult<Catalog> {
        Ok(Catalog::new(
            self.categories.clone(),
            self.fallback_category_id,
        )?)
    }

    /// Checks sample items and mapping targets against the catalog rules.
    pub(crate) fn validate_pool(&self) -> StoreResult<()> {
        let mut ids = BTreeSet::new();
        for item in &self.sample_items {
            item.validate()?;
            if item.id == ItemId::MAX {
                return Err(StoreError::Seed(format!(
                    "sample item id {} leaves no room for new ids",
                    item.id
                )));
            }
            if !ids.insert(item.id) {
                return Err(StoreError::Seed(format!(
                    "duplicate sample item id {}",
                    item.id
                )));
            }
        }
        let known: BTreeSet<CategoryId> = self.categories.iter().map(|c| c.id).collect();
        if let Some(category_id) = self
            .mappings
            .values()
            .find(|category_id| !known.contains(category_id))
        {
            return Err(StoreError::UnknownCategory(*category_id));
        }
        Ok(())
    }

    /// Returns the starting items.
    ///
    /// A full-size sample keeps pool order; a partial one is a random subset.
    pub(crate) fn pick_items(&self) -> Vec<Item> {
        let size = self.sample_size.min(self.sample_items.len());
        if size == self.sample_items.len() {
            return self.sample_items.clone();
        }
        match self.rng_seed {
            Some(seed) => choose(&self.sample_items, size, &mut StdRng::seed_from_u64(seed)),
            None => choose(&self.sample_items, size, &mut rand::thread_rng()),
        }
    }

    /// First id strictly greater than every sample id.
    pub(crate) fn first_free_id(&self) -> StoreResult<ItemId> {
        match self.sample_items.iter().map(|item| item.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(StoreError::IdsExhausted),
        }
    }
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn choose<R: Rng + ?Sized>(pool: &[Item], size: usize, rng: &mut R) -> Vec<Item> {
    pool.choose_multiple(rng, size).cloned().collect()
}
