//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One parameterized statement per pooled connection checkout
//! - Affected-row counts decide not-found (no check-then-write)
//! - No multi-statement transactions

pub mod items;
pub mod memory;

pub use items::{DbError, Item, ItemRepo, ItemStore};
pub use memory::MemoryItemStore;
