//! Entity Kernel: the mutable structures memento snapshots and restores.
//!
//! # Invariants
//! - All state mutations flow through the `Entity` operations.
//! - A rejected mutation leaves the entity unchanged.

pub mod collection;
pub mod entity;
pub mod record;

pub use collection::Collection;
pub use entity::{Entity, EntityError};
pub use record::{Record, Validator};

pub fn crate_info() -> &'static str {
    "memento-kernel v0.1.0"
}
