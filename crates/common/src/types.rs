use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Flat, insertion-ordered mapping from attribute key to value.
///
/// This is the serialized form every entity produces and consumes.
pub type Attributes = Map<String, Value>;

/// Which shape of entity is under management.
///
/// Read once when a serializer is bound to an entity and never re-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A single flat mapping of attributes.
    Record,
    /// An ordered sequence of records keyed by id.
    Collection,
}

/// Set of attribute keys excluded from capture and restore comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreList(BTreeSet<String>);

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is ignored.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Copy `attrs` without any ignored key. Remaining keys keep their order.
    pub fn drop_ignored(&self, attrs: &Attributes) -> Attributes {
        attrs
            .iter()
            .filter(|(key, _)| !self.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn drop_ignored_removes_listed_keys() {
        let ignore: IgnoreList = ["secret", "missing"].into_iter().collect();
        let source = attrs(json!({"a": 1, "secret": "x", "b": 2}));

        let filtered = ignore.drop_ignored(&source);
        assert_eq!(filtered, attrs(json!({"a": 1, "b": 2})));
        // The source is untouched.
        assert!(source.contains_key("secret"));
    }

    #[test]
    fn drop_ignored_keeps_insertion_order() {
        let ignore: IgnoreList = ["m"].into_iter().collect();
        let source = attrs(json!({"z": 1, "m": 2, "a": 3}));
        let filtered = ignore.drop_ignored(&source);
        let keys: Vec<&str> = filtered.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn empty_ignore_list_is_identity() {
        let source = attrs(json!({"a": 1, "b": [1, 2]}));
        assert_eq!(IgnoreList::new().drop_ignored(&source), source);
    }

    #[test]
    fn ignore_list_deserializes_from_array() {
        let ignore: IgnoreList = serde_json::from_value(json!(["a", "b", "a"])).unwrap();
        assert_eq!(ignore.len(), 2);
        assert!(ignore.contains("a"));
        assert!(ignore.contains("b"));
    }

    #[test]
    fn entity_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(EntityKind::Collection).unwrap(),
            json!("collection")
        );
    }
}
