use crate::error::WarrenError;
use crate::model::keyword;
use crate::WarrenResult;
use serde_json::{Map, Value};
use std::convert::TryFrom;

/// A decoded JSON object whose members can be probed without failing on absence
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct StandardObject(Map<String, Value>);

impl StandardObject {
    pub fn new() -> Self { Default::default() }

    /// Wraps `value`, failing when it is not a JSON object. `member` names the
    /// value in the error message
    pub fn from_value(value: Value, member: &str) -> WarrenResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(WarrenError::invalid(member, "an object")),
        }
    }

    pub fn has(&self, key: &str) -> bool { self.0.contains_key(key) }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    pub fn get_str(&self, key: &str) -> Option<&str> { self.0.get(key).and_then(Value::as_str) }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_map(&self) -> &Map<String, Value> { &self.0 }

    pub fn into_map(self) -> Map<String, Value> { self.0 }
}

impl From<Map<String, Value>> for StandardObject {
    fn from(map: Map<String, Value>) -> Self { Self(map) }
}

impl From<StandardObject> for Value {
    fn from(object: StandardObject) -> Self { Value::Object(object.0) }
}

impl TryFrom<Value> for StandardObject {
    type Error = WarrenError;

    fn try_from(value: Value) -> Result<Self, Self::Error> { Self::from_value(value, "Value") }
}

/// Anything backed by a [`StandardObject`]
pub trait ObjectView {
    fn object(&self) -> &StandardObject;

    fn has(&self, key: &str) -> bool { self.object().has(key) }

    fn get(&self, key: &str) -> Option<&Value> { self.object().get(key) }
}

/// Strict access to the `type` and `id` members
pub trait Identifiable: ObjectView {
    /// Fails if the `type` member is absent, not a string, or empty
    fn ty(&self) -> WarrenResult<&str> { identity_member(self.object(), keyword::TYPE, "Type") }

    fn has_type(&self) -> bool { self.object().has(keyword::TYPE) }

    /// Fails if the `id` member is absent, not a string, or empty
    fn id(&self) -> WarrenResult<&str> { identity_member(self.object(), keyword::ID, "Id") }

    fn has_id(&self) -> bool { self.object().has(keyword::ID) }
}

/// Access to the optional `meta` member
pub trait MetaMember: ObjectView {
    /// An absent or `null` meta member reads as an empty object
    fn meta(&self) -> WarrenResult<StandardObject> {
        match self.object().get(keyword::META) {
            None | Some(Value::Null) => Ok(StandardObject::new()),
            Some(Value::Object(meta)) => Ok(meta.clone().into()),
            Some(_) => Err(WarrenError::invalid("Meta", "an object")),
        }
    }

    fn has_meta(&self) -> bool { self.object().has(keyword::META) }
}

fn identity_member<'a>(object: &'a StandardObject, key: &str, name: &str) -> WarrenResult<&'a str> {
    match object.get(key) {
        None => Err(WarrenError::not_present(name)),
        Some(Value::String(value)) if value.is_empty() => {
            Err(WarrenError::EmptyMember(name.to_string()))
        },
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(WarrenError::invalid(name, "a string")),
    }
}
