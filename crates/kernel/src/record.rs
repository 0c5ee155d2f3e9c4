use memento_common::{Attributes, EntityKind};
use serde_json::Value;

use crate::entity::{Entity, EntityError};

/// Checks a candidate attribute set before a record accepts it.
pub type Validator = fn(&Attributes) -> Result<(), String>;

/// A flat key/value record.
///
/// Every mutation is validated against the candidate state before it is
/// committed, so a rejected `set`, `unset` or `reset` leaves the record
/// exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct Record {
    attributes: Attributes,
    validator: Option<Validator>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record holding `attributes`. No validation is applied.
    pub fn from_attributes(attributes: Attributes) -> Self {
        Self {
            attributes,
            validator: None,
        }
    }

    /// Attach a validator run on every subsequent mutation.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Read-only access to all attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Set a single attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<(), EntityError> {
        let mut candidate = self.attributes.clone();
        candidate.insert(key.into(), value);
        self.commit(candidate)
    }

    fn commit(&mut self, candidate: Attributes) -> Result<(), EntityError> {
        if let Some(validate) = self.validator {
            validate(&candidate).map_err(EntityError::Validation)?;
        }
        self.attributes = candidate;
        Ok(())
    }
}

impl Entity for Record {
    type Error = EntityError;

    fn kind(&self) -> EntityKind {
        EntityKind::Record
    }

    fn to_json(&self) -> Attributes {
        self.attributes.clone()
    }

    fn set(&mut self, attrs: &Attributes) -> Result<(), EntityError> {
        let mut candidate = self.attributes.clone();
        for (key, value) in attrs {
            candidate.insert(key.clone(), value.clone());
        }
        self.commit(candidate)
    }

    fn unset(&mut self, key: &str) -> Result<(), EntityError> {
        if !self.attributes.contains_key(key) {
            return Ok(());
        }
        let mut candidate = self.attributes.clone();
        candidate.shift_remove(key);
        self.commit(candidate)
    }

    fn remove(&mut self, key: &str) -> Result<(), EntityError> {
        self.unset(key)
    }

    fn reset(&mut self, attrs: &Attributes) -> Result<(), EntityError> {
        self.commit(attrs.clone())
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

    fn no_negative_age(attrs: &Attributes) -> Result<(), String> {
        match attrs.get("age").and_then(Value::as_i64) {
            Some(age) if age < 0 => Err(format!("age {age} is negative")),
            _ => Ok(()),
        }
    }

    #[test]
    fn record_starts_empty() {
        let r = Record::new();
        assert!(r.is_empty());
        assert_eq!(r.kind(), EntityKind::Record);
    }

    #[test]
    fn set_merges_attributes() {
        let mut r = Record::from_attributes(attrs(json!({"a": 1, "b": 2})));
        r.set(&attrs(json!({"b": 3, "c": 4}))).unwrap();
        assert_eq!(r.to_json(), attrs(json!({"a": 1, "b": 3, "c": 4})));
    }

    #[test]
    fn unset_drops_attribute() {
        let mut r = Record::from_attributes(attrs(json!({"a": 1, "b": 2})));
        r.unset("a").unwrap();
        assert!(!r.has("a"));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn unset_missing_key_is_noop() {
        let mut r = Record::from_attributes(attrs(json!({"a": 1})));
        r.unset("zzz").unwrap();
        assert_eq!(r.to_json(), attrs(json!({"a": 1})));
    }

    #[test]
    fn reset_replaces_everything() {
        let mut r = Record::from_attributes(attrs(json!({"a": 1, "b": 2})));
        r.reset(&attrs(json!({"c": 3}))).unwrap();
        assert_eq!(r.to_json(), attrs(json!({"c": 3})));
    }

    #[test]
    fn to_json_is_a_copy() {
        let mut r = Record::from_attributes(attrs(json!({"a": 1})));
        let before = r.to_json();
        r.insert("a", json!(2)).unwrap();
        assert_eq!(before.get("a"), Some(&json!(1)));
    }

    #[test]
    fn rejected_set_leaves_record_unchanged() {
        let mut r =
            Record::from_attributes(attrs(json!({"age": 30}))).with_validator(no_negative_age);
        let err = r.set(&attrs(json!({"age": -1, "name": "x"}))).unwrap_err();
        assert!(matches!(err, EntityError::Validation(_)));
        assert_eq!(r.to_json(), attrs(json!({"age": 30})));
    }

    #[test]
    fn validator_runs_on_insert() {
        let mut r = Record::new().with_validator(no_negative_age);
        assert!(r.insert("age", json!(-5)).is_err());
        assert!(r.insert("age", json!(5)).is_ok());
        assert_eq!(r.get("age"), Some(&json!(5)));
    }
}
