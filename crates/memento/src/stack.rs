use memento_common::IgnoreList;
use memento_kernel::Entity;

use crate::config::MementoConfig;
use crate::serializer::Serializer;
use crate::snapshot::Snapshot;

/// Ordered stack of snapshots over one bound entity.
///
/// Snapshots are pushed by `store` and consumed from the tail by `restore`.
/// A snapshot is popped only after the entity accepted the restore, so a
/// failed restore leaves the stack untouched and can be retried.
#[derive(Debug)]
pub struct MementoStack<'a, E: Entity> {
    serializer: Serializer<'a, E>,
    config: MementoConfig,
    snapshots: Vec<Snapshot>,
    next_seq: u64,
}

impl<'a, E: Entity> MementoStack<'a, E> {
    pub fn new(serializer: Serializer<'a, E>, config: MementoConfig) -> Self {
        Self {
            serializer,
            config,
            snapshots: Vec::new(),
            next_seq: 0,
        }
    }

    /// Capture the entity with the default ignore list. Returns the index of
    /// the new snapshot.
    pub fn store(&mut self) -> usize {
        let attributes = self.serializer.serialize(&self.config.ignore);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.snapshots.push(Snapshot::new(seq, attributes));
        tracing::debug!(seq, depth = self.snapshots.len(), "stored snapshot");
        self.snapshots.len() - 1
    }

    /// Restore the most recent snapshot and pop it.
    ///
    /// `ignore` replaces the default ignore list for this call only.
    /// Returns `Ok(None)` without touching the entity when the stack is empty.
    pub fn restore(&mut self, ignore: Option<IgnoreList>) -> Result<Option<Snapshot>, E::Error> {
        let Some(last) = self.snapshots.last() else {
            tracing::debug!("restore on empty stack");
            return Ok(None);
        };
        let _span = tracing::info_span!("memento_restore", seq = last.seq).entered();

        let ignore = ignore.unwrap_or_else(|| self.config.ignore.clone());
        self.serializer.restore(last.attributes(), &ignore)?;

        let popped = self.snapshots.pop();
        tracing::debug!(depth = self.snapshots.len(), "restored snapshot");
        Ok(popped)
    }

    /// Restore the oldest snapshot with the default ignore list, then forget
    /// the whole history. Returns the origin snapshot, or `Ok(None)` when the
    /// stack is empty.
    pub fn restart(&mut self) -> Result<Option<Snapshot>, E::Error> {
        let Some(origin) = self.snapshots.first() else {
            tracing::debug!("restart on empty stack");
            return Ok(None);
        };
        let _span = tracing::info_span!("memento_restore", seq = origin.seq).entered();

        self.serializer
            .restore(origin.attributes(), &self.config.ignore)?;

        let discarded = self.snapshots.len();
        let origin = self.snapshots.drain(..).next();
        tracing::debug!(discarded, "restarted from origin snapshot");
        Ok(origin)
    }

    /// Number of snapshots held.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The snapshot the next `restore` would apply.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// All held snapshots in capture order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn config(&self) -> &MementoConfig {
        &self.config
    }

    pub fn serializer(&self) -> &Serializer<'a, E> {
        &self.serializer
    }

    pub fn serializer_mut(&mut self) -> &mut Serializer<'a, E> {
        &mut self.serializer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memento_common::Attributes;
    use memento_kernel::{EntityError, Record};
    use serde_json::{Value, json};

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn stack(record: &mut Record) -> MementoStack<'_, Record> {
        MementoStack::new(Serializer::new(record), MementoConfig::default())
    }

    fn c_requires_b(attrs: &Attributes) -> Result<(), String> {
        if attrs.contains_key("c") && !attrs.contains_key("b") {
            return Err("c requires b".into());
        }
        Ok(())
    }

    #[test]
    fn store_returns_index_and_grows() {
        let mut record = Record::new();
        let mut s = stack(&mut record);
        assert_eq!(s.store(), 0);
        assert_eq!(s.store(), 1);
        assert_eq!(s.depth(), 2);
    }

    #[test]
    fn sequence_numbers_are_monotonic_across_pops() {
        let mut record = Record::new();
        let mut s = stack(&mut record);
        s.store();
        s.restore(None).unwrap();
        s.store();
        assert_eq!(s.peek().unwrap().seq, 1);
    }

    #[test]
    fn restore_pops_tail() {
        let mut record = Record::from_attributes(attrs(json!({"v": 1})));
        let mut s = stack(&mut record);
        s.store();
        s.serializer_mut().entity_mut().insert("v", json!(2)).unwrap();
        s.store();
        s.serializer_mut().entity_mut().insert("v", json!(3)).unwrap();

        let popped = s.restore(None).unwrap().unwrap();
        assert_eq!(popped.get("v"), Some(&json!(2)));
        assert_eq!(s.serializer().entity().get("v"), Some(&json!(2)));
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn restore_empty_returns_none() {
        let mut record = Record::from_attributes(attrs(json!({"v": 1})));
        let mut s = stack(&mut record);
        assert!(s.restore(None).unwrap().is_none());
        assert!(s.is_empty());
        assert_eq!(s.serializer().entity().get("v"), Some(&json!(1)));
    }

    #[test]
    fn restart_empty_returns_none() {
        let mut record = Record::new();
        let mut s = stack(&mut record);
        assert!(s.restart().unwrap().is_none());
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn restart_returns_origin_and_clears() {
        let mut record = Record::from_attributes(attrs(json!({"v": 1})));
        let mut s = stack(&mut record);
        s.store();
        s.serializer_mut().entity_mut().insert("v", json!(2)).unwrap();
        s.store();
        s.store();

        let origin = s.restart().unwrap().unwrap();
        assert_eq!(origin.seq, 0);
        assert!(s.is_empty());
        assert_eq!(s.serializer().entity().get("v"), Some(&json!(1)));
    }

    #[test]
    fn override_replaces_default_ignore() {
        let mut record = Record::from_attributes(attrs(json!({"a": 1, "b": 1})));
        let config = MementoConfig::default().with_ignore(["a"]);
        let mut s = MementoStack::new(Serializer::new(&mut record), config);
        s.store();
        s.serializer_mut()
            .entity_mut()
            .set(&attrs(json!({"a": 2, "b": 2})))
            .unwrap();

        // "a" was dropped at capture time. With the override it is no
        // longer ignored, so it counts as added and is removed.
        s.restore(Some(["b"].into_iter().collect())).unwrap();
        assert_eq!(record.to_json(), attrs(json!({"b": 2})));
    }

    #[test]
    fn failed_restore_keeps_snapshot() {
        let mut record =
            Record::from_attributes(attrs(json!({"a": 1}))).with_validator(c_requires_b);
        let mut s = stack(&mut record);
        s.store();
        s.serializer_mut()
            .entity_mut()
            .set(&attrs(json!({"b": 1, "c": 1})))
            .unwrap();

        // Unsetting "b" before "c" is rejected by the entity.
        let err = s.restore(None).unwrap_err();
        assert!(matches!(err, EntityError::Validation(_)));
        assert_eq!(s.depth(), 1);
        assert_eq!(
            s.serializer().entity().to_json(),
            attrs(json!({"a": 1, "b": 1, "c": 1}))
        );

        let err = s.restart().unwrap_err();
        assert!(matches!(err, EntityError::Validation(_)));
        assert_eq!(s.depth(), 1);
    }
}
