//! Checklist state store.
//!
//! # Responsibility
//! - Own items, category mapping and mode for one session.
//! - Express every mutation as a snapshot command routed through `UndoManager`.
//! - Broadcast one notification after each completed state change.
//!
//! # Invariants
//! - Effective category is always computed at read time, never cached.
//! - Invalid references and invalid fields are rejected with `StoreError`.
//! - Mode changes notify but never enter the undo history.

mod checklist;
mod error;
mod seed;
mod state;

pub use checklist::{CategorySection, Checklist, ChecklistSnapshot, Mode};
pub use error::{StoreError, StoreResult};
pub use seed::{SeedConfig, OTHER_CATEGORY_ID};
