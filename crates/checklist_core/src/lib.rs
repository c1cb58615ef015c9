//! Mutable state core for a checklist application.
//! This crate is the single source of truth for checklist invariants: every
//! mutation is reversible and every change is broadcast to observers.

pub mod logging;
pub mod model;
pub mod notify;
pub mod store;
pub mod undo;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Catalog, CatalogError, Category, CategoryId};
pub use model::item::{Item, ItemId, ItemPatch, ItemValidationError, ResolvedItem};
pub use notify::{Observer, Subject, SubscriptionId};
pub use store::{
    CategorySection, Checklist, ChecklistSnapshot, Mode, SeedConfig, StoreError, StoreResult,
    OTHER_CATEGORY_ID,
};
pub use undo::{Command, UndoManager};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
