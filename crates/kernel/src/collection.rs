use memento_common::{Attributes, EntityKind};
use serde_json::Value;
use uuid::Uuid;

use crate::entity::{Entity, EntityError};
use crate::record::Record;

/// Attribute that identifies a collection member.
pub const ID_ATTRIBUTE: &str = "id";

/// An ordered sequence of records, each identified by its `id` attribute.
///
/// Serializes to a mapping from member id (string form) to the member's
/// attributes, in member order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    members: Vec<Record>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. A member without an id is given a fresh one. A member
    /// whose id already exists replaces the old one in place.
    /// Returns the member id.
    pub fn add(&mut self, mut attrs: Attributes) -> String {
        let id = match attrs.get(ID_ATTRIBUTE) {
            Some(value) => id_string(value),
            None => {
                let id = Uuid::new_v4().to_string();
                attrs.insert(ID_ATTRIBUTE.into(), Value::String(id.clone()));
                id
            }
        };
        self.upsert(&id, Record::from_attributes(attrs));
        id
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.position(id).map(|i| &self.members[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in collection order.
    pub fn ids(&self) -> Vec<String> {
        self.members.iter().filter_map(member_id).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|m| member_id(m).as_deref() == Some(id))
    }

    fn upsert(&mut self, id: &str, record: Record) {
        match self.position(id) {
            Some(i) => self.members[i] = record,
            None => self.members.push(record),
        }
    }
}

impl Entity for Collection {
    type Error = EntityError;

    fn kind(&self) -> EntityKind {
        EntityKind::Collection
    }

    fn to_json(&self) -> Attributes {
        self.members
            .iter()
            .filter_map(|m| member_id(m).map(|id| (id, Value::Object(m.to_json()))))
            .collect()
    }

    fn set(&mut self, attrs: &Attributes) -> Result<(), EntityError> {
        let members = members_from(attrs)?;
        for (id, record) in members {
            self.upsert(&id, record);
        }
        Ok(())
    }

    fn unset(&mut self, key: &str) -> Result<(), EntityError> {
        self.remove(key)
    }

    fn remove(&mut self, key: &str) -> Result<(), EntityError> {
        if let Some(i) = self.position(key) {
            self.members.remove(i);
        }
        Ok(())
    }

    fn reset(&mut self, attrs: &Attributes) -> Result<(), EntityError> {
        let members = members_from(attrs)?;
        self.members = members.into_iter().map(|(_, record)| record).collect();
        Ok(())
    }
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn member_id(record: &Record) -> Option<String> {
    record.get(ID_ATTRIBUTE).map(id_string)
}

/// Convert a serialized membership mapping into records. Fails before any
/// member is produced if one value is not an object. Values sharing an id
/// collapse into one member at the first position, the last value winning.
fn members_from(attrs: &Attributes) -> Result<Vec<(String, Record)>, EntityError> {
    let mut members: Vec<(String, Record)> = Vec::with_capacity(attrs.len());
    for (key, value) in attrs {
        let Value::Object(member) = value else {
            return Err(EntityError::InvalidMember { key: key.clone() });
        };
        let mut member = member.clone();
        let id = match member.get(ID_ATTRIBUTE) {
            Some(id) => id_string(id),
            None => {
                member.insert(ID_ATTRIBUTE.into(), Value::String(key.clone()));
                key.clone()
            }
        };
        let record = Record::from_attributes(member);
        match members.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = record,
            None => members.push((id, record)),
        }
    }
    Ok(members)
}
