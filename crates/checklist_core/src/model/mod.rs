//! Checklist domain model.
//!
//! # Responsibility
//! - Define items, categories and the validated category catalog.
//!
//! # Invariants
//! - An item's effective category is `mapping[name]`, else the catalog fallback.
//! - Models carry no undo or notification logic; the store owns that.

pub mod category;
pub mod item;
