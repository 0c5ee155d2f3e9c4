use memento_common::Attributes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A captured copy of an entity's serialized state.
///
/// Already filtered by the ignore list that was active at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture sequence number, unique within one stack.
    pub seq: u64,
    attributes: Attributes,
}

impl Snapshot {
    pub(crate) fn new(seq: u64, attributes: Attributes) -> Self {
        Self { seq, attributes }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
