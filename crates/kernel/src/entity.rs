use memento_common::{Attributes, EntityKind};

/// Errors raised by the reference entities.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("collection member {key:?} is not an object")]
    InvalidMember { key: String },
}

/// A mutable structure that can be serialized to a flat mapping and
/// mutated back from one.
///
/// Records implement `set` as a merge and `reset` as a full replace of their
/// attributes. Collections key their members by id: `remove` drops a member
/// and `reset` replaces the whole membership.
pub trait Entity {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Which shape this entity has.
    fn kind(&self) -> EntityKind;

    /// Current state as an owned mapping.
    fn to_json(&self) -> Attributes;

    /// Merge `attrs` into the current state.
    fn set(&mut self, attrs: &Attributes) -> Result<(), Self::Error>;

    /// Drop a single attribute.
    fn unset(&mut self, key: &str) -> Result<(), Self::Error>;

    /// Drop a single element.
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;

    /// Replace the whole state with `attrs`.
    fn reset(&mut self, attrs: &Attributes) -> Result<(), Self::Error>;
}
