use crate::error::WarrenError;
use crate::model::keyword;
use crate::model::object::{Identifiable, MetaMember, ObjectView, StandardObject};
use crate::WarrenResult;
use serde_json::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

/// Resource ids grouped by (mapped) resource type, groups in first-seen order
pub type TypeGroups = IndexMap<String, Vec<String>>;

/// Resource Identifier: the `{ type, id }` reference to a resource
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct ResourceIdentifier(StandardObject);

impl ObjectView for ResourceIdentifier {
    fn object(&self) -> &StandardObject { &self.0 }
}

impl Identifiable for ResourceIdentifier {}
impl MetaMember for ResourceIdentifier {}

impl From<StandardObject> for ResourceIdentifier {
    fn from(object: StandardObject) -> Self { Self(object) }
}

impl ResourceIdentifier {
    pub fn new(ty: impl Into<String>, id: impl Into<String>) -> Self {
        let mut object = StandardObject::new();
        object.set(keyword::TYPE, ty.into()).set(keyword::ID, id.into());
        Self(object)
    }

    pub fn from_value(value: Value) -> WarrenResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map.into())),
            _ => Err(WarrenError::invalid_argument("Expecting only identifier objects.")),
        }
    }

    /// Whether the `type` member equals any of `types`
    pub fn is_type<T: AsRef<str>>(&self, types: &[T]) -> bool {
        match self.0.get_str(keyword::TYPE) {
            Some(ty) => types.iter().any(|t| t.as_ref() == ty),
            None => false,
        }
    }

    /// Translates the wire type name through `map`
    pub fn map_type<'m, V>(&self, map: &'m HashMap<String, V>) -> WarrenResult<&'m V> {
        let ty = self.ty()?;
        map.get(ty).ok_or_else(|| WarrenError::TypeNotMapped(ty.to_string()))
    }

    /// Non-failing probe: both `type` and `id` members are present
    pub fn is_complete(&self) -> bool { self.has_type() && self.has_id() }

    /// `type:id`, failing like [`Identifiable::ty`] and [`Identifiable::id`]
    /// when either member is missing or empty
    pub fn key(&self) -> WarrenResult<String> { Ok(format!("{}:{}", self.ty()?, self.id()?)) }

    pub fn is_same(&self, other: &ResourceIdentifier) -> bool {
        self.0.get(keyword::TYPE) == other.0.get(keyword::TYPE)
            && self.0.get(keyword::ID) == other.0.get(keyword::ID)
    }
}

impl PartialEq for ResourceIdentifier {
    fn eq(&self, other: &Self) -> bool { self.is_same(other) }
}

impl Eq for ResourceIdentifier {}

impl Hash for ResourceIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_member(self.0.get(keyword::TYPE), state);
        hash_member(self.0.get(keyword::ID), state);
    }
}

fn hash_member<H: Hasher>(value: Option<&Value>, state: &mut H) {
    match value {
        None => 0u8.hash(state),
        Some(Value::String(s)) => s.hash(state),
        Some(other) => other.to_string().hash(state),
    }
}

/// `type:id`; a missing member prints as an empty string, use
/// [`ResourceIdentifier::key`] for a checked key
impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let member = |key: &str| match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        write!(f, "{}:{}", member(keyword::TYPE), member(keyword::ID))
    }
}

/// Ordered set of resource identifiers, the first of two equal identifiers wins
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ResourceIdentifierCollection {
    stack: Vec<ResourceIdentifier>,
}

impl ResourceIdentifierCollection {
    pub fn new() -> Self { Default::default() }

    /// Wraps every item of a decoded JSON array
    pub fn create(values: &[Value]) -> WarrenResult<Self> {
        let mut collection = Self::new();
        for value in values {
            collection.add(ResourceIdentifier::from_value(value.clone())?);
        }
        Ok(collection)
    }

    pub fn add(&mut self, identifier: ResourceIdentifier) {
        if !self.has(&identifier) {
            self.stack.push(identifier);
        }
    }

    pub fn add_many(&mut self, identifiers: impl IntoIterator<Item = ResourceIdentifier>) {
        for identifier in identifiers {
            self.add(identifier);
        }
    }

    pub fn set_all(&mut self, identifiers: impl IntoIterator<Item = ResourceIdentifier>) {
        self.clear();
        self.add_many(identifiers);
    }

    pub fn clear(&mut self) { self.stack.clear(); }

    pub fn has(&self, identifier: &ResourceIdentifier) -> bool {
        self.stack.iter().any(|own| own.is_same(identifier))
    }

    pub fn len(&self) -> usize { self.stack.len() }

    pub fn is_empty(&self) -> bool { self.stack.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceIdentifier> { self.stack.iter() }

    pub fn is_complete(&self) -> bool { self.stack.iter().all(ResourceIdentifier::is_complete) }

    pub fn is_only<T: AsRef<str>>(&self, types: &[T]) -> bool {
        self.stack.iter().all(|identifier| identifier.is_type(types))
    }

    /// Groups the ids by type, or by the value `type_map` gives for the type.
    /// Groups and the ids inside them keep the collection order
    pub fn map(&self, type_map: Option<&HashMap<String, String>>) -> WarrenResult<TypeGroups> {
        let mut groups = TypeGroups::new();
        for identifier in &self.stack {
            let key = match type_map {
                Some(type_map) => identifier.map_type(type_map)?.clone(),
                None => identifier.ty()?.to_string(),
            };
            groups.entry(key).or_insert_with(Vec::new).push(identifier.id()?.to_string());
        }
        Ok(groups)
    }

    pub fn ids(&self) -> WarrenResult<Vec<String>> {
        self.stack.iter().map(|identifier| Ok(identifier.id()?.to_string())).collect()
    }
}

impl FromIterator<ResourceIdentifier> for ResourceIdentifierCollection {
    fn from_iter<I: IntoIterator<Item = ResourceIdentifier>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.add_many(iter);
        collection
    }
}

impl IntoIterator for ResourceIdentifierCollection {
    type IntoIter = std::vec::IntoIter<ResourceIdentifier>;
    type Item = ResourceIdentifier;

    fn into_iter(self) -> Self::IntoIter { self.stack.into_iter() }
}

impl<'a> IntoIterator for &'a ResourceIdentifierCollection {
    type IntoIter = std::slice::Iter<'a, ResourceIdentifier>;
    type Item = &'a ResourceIdentifier;

    fn into_iter(self) -> Self::IntoIter { self.stack.iter() }
}

/// Resource linkage: `null`, one identifier, or many
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IdentifierData {
    Single(Option<ResourceIdentifier>),
    Multiple(ResourceIdentifierCollection),
}

impl IdentifierData {
    pub fn data(&self) -> Vec<ResourceIdentifier> {
        match self {
            IdentifierData::Single(Some(data)) => vec![data.clone()],
            IdentifierData::Single(None) => Default::default(),
            IdentifierData::Multiple(data) => data.iter().cloned().collect(),
        }
    }
}

impl Default for IdentifierData {
    fn default() -> Self { IdentifierData::Single(None) }
}
