use crate::definition::TokenAttribute;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Name of a host entity type, e.g. `"invitations"`.
///
/// Registries and stores key their data by this name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityType(Cow<'static, str>);

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Usable in `static` items, so host types can expose a shared name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for EntityType {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

/// Identity of a persisted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The view of a host entity instance that token generation needs.
///
/// The two `*_token` hooks are per-attribute overrides. Returning `None`
/// falls back to the default behaviour: generate when the value is blank, and
/// draw candidates from the configured generator.
pub trait Entity: Send + Sync {
    fn entity_type(&self) -> &EntityType;

    /// The persisted identity, or `None` for an instance not yet stored.
    fn id(&self) -> Option<EntityId>;

    /// Reads an attribute. Unknown attributes read as [`Value::Null`].
    fn attribute(&self, name: &str) -> Value;

    fn set_attribute(&mut self, name: &str, value: String);

    /// Replaces the blank check for `definition` when it returns `Some`.
    fn should_generate_token(&self, _definition: &TokenAttribute) -> Option<bool> {
        None
    }

    /// Replaces the generator for `definition` when it returns `Some`.
    ///
    /// Called once per attempt, so an override that always returns the same
    /// value will exhaust the attempt budget on a collision.
    fn generate_token(&self, _definition: &TokenAttribute) -> Option<String> {
        None
    }
}

/// A schemaless entity: a type name, an optional identity and a bag of
/// attributes.
///
/// Useful for hosts that keep rows as maps, and as the row format of the
/// in-memory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    entity_type: EntityType,
    id: Option<EntityId>,
    attributes: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            id: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets an attribute and returns the record, for building fixtures.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }
}

impl Entity for Record {
    fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn attribute(&self, name: &str) -> Value {
        self.attributes.get(name).cloned().unwrap_or_default()
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        self.attributes.insert(name.to_owned(), Value::Text(value));
    }
}
