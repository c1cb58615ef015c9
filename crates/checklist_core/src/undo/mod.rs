//! Reversible command execution.
//!
//! # Responsibility
//! - Define the two-effect command contract.
//! - Keep done/undone stacks and replay them in LIFO order.
//!
//! # Invariants
//! - A command's forward effect runs exactly once per `execute` or `redo`.
//! - Executing a new command discards every pending redo.

pub mod command;
pub mod manager;

pub use command::Command;
pub use manager::UndoManager;
