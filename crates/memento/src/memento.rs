use memento_kernel::Entity;

use crate::config::MementoConfig;
use crate::serializer::Serializer;
use crate::snapshot::Snapshot;
use crate::stack::MementoStack;

/// Snapshot-based undo over a borrowed entity.
///
/// ```
/// use memento::Memento;
/// use memento_kernel::Record;
/// use serde_json::json;
///
/// let mut record = Record::new();
/// record.insert("a", json!(1)).unwrap();
///
/// let mut memento = Memento::with_defaults(&mut record);
/// memento.store();
/// memento.entity_mut().insert("b", json!(3)).unwrap();
/// memento.restore().unwrap();
///
/// assert!(!memento.entity().has("b"));
/// ```
#[derive(Debug)]
pub struct Memento<'a, E: Entity> {
    stack: MementoStack<'a, E>,
}

impl<'a, E: Entity> Memento<'a, E> {
    /// Bind `entity` with the given configuration.
    pub fn new(entity: &'a mut E, config: MementoConfig) -> Self {
        let serializer = Serializer::new(entity);
        Self {
            stack: MementoStack::new(serializer, config),
        }
    }

    /// Bind `entity` with an empty ignore list.
    pub fn with_defaults(entity: &'a mut E) -> Self {
        Self::new(entity, MementoConfig::default())
    }

    /// Capture the current state. Returns the index of the new snapshot.
    pub fn store(&mut self) -> usize {
        self.stack.store()
    }

    /// Roll back to the most recent snapshot using the default configuration.
    pub fn restore(&mut self) -> Result<Option<Snapshot>, E::Error> {
        self.stack.restore(None)
    }

    /// Roll back to the most recent snapshot, with `config` replacing the
    /// default configuration for this call.
    pub fn restore_with(&mut self, config: MementoConfig) -> Result<Option<Snapshot>, E::Error> {
        self.stack.restore(Some(config.ignore))
    }

    /// Roll back to the first snapshot and forget all history.
    pub fn restart(&mut self) -> Result<Option<Snapshot>, E::Error> {
        self.stack.restart()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether a `restore` would do anything.
    pub fn can_restore(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.stack.peek()
    }

    pub fn config(&self) -> &MementoConfig {
        self.stack.config()
    }

    pub fn entity(&self) -> &E {
        self.stack.serializer().entity()
    }

    pub fn entity_mut(&mut self) -> &mut E {
        self.stack.serializer_mut().entity_mut()
    }
}
