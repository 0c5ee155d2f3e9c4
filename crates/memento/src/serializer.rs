//! Differ/restorer: serializes an entity into snapshot attributes and
//! applies snapshot attributes back onto it.

use memento_common::{Attributes, EntityKind, IgnoreList};
use memento_kernel::Entity;

/// Keys present in `current` but absent from `previous`, in `current` order.
///
/// These are attributes added after `previous` was captured. If either side
/// is missing there is nothing to compare and no key counts as added.
pub fn added_keys(current: Option<&Attributes>, previous: Option<&Attributes>) -> Vec<String> {
    let (Some(current), Some(previous)) = (current, previous) else {
        return Vec::new();
    };
    current
        .keys()
        .filter(|key| !previous.contains_key(key.as_str()))
        .cloned()
        .collect()
}

/// Binds an entity for serialization and restore.
///
/// The entity kind is read once here and drives every later restore.
#[derive(Debug)]
pub struct Serializer<'a, E: Entity> {
    entity: &'a mut E,
    kind: EntityKind,
}

impl<'a, E: Entity> Serializer<'a, E> {
    pub fn new(entity: &'a mut E) -> Self {
        let kind = entity.kind();
        Self { entity, kind }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn entity(&self) -> &E {
        self.entity
    }

    pub fn entity_mut(&mut self) -> &mut E {
        self.entity
    }

    /// Current entity state without any ignored key.
    pub fn serialize(&self, ignore: &IgnoreList) -> Attributes {
        ignore.drop_ignored(&self.entity.to_json())
    }

    /// Mutate the entity back into `previous`.
    ///
    /// Keys added since `previous` are removed first, then the retained
    /// attributes are applied: merged into a record, or reset onto a
    /// collection. Ignored keys are neither removed nor restored.
    pub fn restore(&mut self, previous: &Attributes, ignore: &IgnoreList) -> Result<(), E::Error> {
        let previous = ignore.drop_ignored(previous);
        let current = self.serialize(ignore);

        let added = added_keys(Some(&current), Some(&previous));
        tracing::trace!(kind = ?self.kind, removed = ?added, "removing added attributes");
        for key in &added {
            match self.kind {
                EntityKind::Record => self.entity.unset(key)?,
                EntityKind::Collection => self.entity.remove(key)?,
            }
        }

        match self.kind {
            EntityKind::Record => self.entity.set(&previous),
            EntityKind::Collection => {
                // Reset replaces the whole membership. Ignored members keep
                // their current slot; the other slots take the snapshot's
                // members in order, and any left over go at the end.
                let mut restored = previous.into_iter();
                let mut members = Attributes::new();
                for (key, value) in self.entity.to_json() {
                    if ignore.contains(&key) {
                        members.insert(key, value);
                    } else if let Some((key, value)) = restored.next() {
                        members.insert(key, value);
                    }
                }
                members.extend(restored);
                self.entity.reset(&members)
            }
        }
    }
}
