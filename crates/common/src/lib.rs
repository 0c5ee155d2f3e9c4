//! Shared types: attribute maps, ignore lists and entity kinds.
//!
//! # Invariants
//! - `Attributes` preserves insertion order.
//! - Filtering through an `IgnoreList` always yields a fresh copy.

mod types;

pub use types::{Attributes, EntityKind, IgnoreList};

pub fn crate_info() -> &'static str {
    "memento-common v0.1.0"
}
