//! Memento: point-in-time snapshots and diff-based restore for mutable
//! records and collections.
//!
//! # Invariants
//! - Snapshots are value copies; later mutation never alters them.
//! - The stack holds snapshots in capture order; `restore` consumes the tail.
//! - Ignored keys are never captured, removed or restored.
//! - A snapshot is popped only after the entity accepted the restore.

mod config;
mod memento;
pub mod serializer;
mod snapshot;
mod stack;

pub use config::{ConfigError, MementoConfig};
pub use memento::Memento;
pub use serializer::{Serializer, added_keys};
pub use snapshot::Snapshot;
pub use stack::MementoStack;

pub use memento_common::{Attributes, EntityKind, IgnoreList};
pub use memento_kernel::{Collection, Entity, EntityError, Record};

pub fn crate_info() -> &'static str {
    "memento v0.1.0"
}
