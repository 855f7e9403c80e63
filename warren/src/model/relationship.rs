use crate::error::WarrenError;
use crate::model::identifier::{IdentifierData, ResourceIdentifier, ResourceIdentifierCollection};
use crate::model::keyword;
use crate::model::link::{links_from_member, Links};
use crate::model::object::{MetaMember, ObjectView, StandardObject};
use crate::WarrenResult;
use serde_json::Value;

/// Shape of the `data` member, decided once when the relationship is wrapped
#[derive(Debug, Clone, PartialEq)]
enum Linkage {
    Absent,
    HasOne(Option<StandardObject>),
    HasMany(Vec<Value>),
    Malformed,
}

impl Linkage {
    fn of(object: &StandardObject) -> Self {
        match object.get(keyword::DATA) {
            None => Linkage::Absent,
            Some(Value::Null) => Linkage::HasOne(None),
            Some(Value::Object(map)) => Linkage::HasOne(Some(map.clone().into())),
            Some(Value::Array(items)) => Linkage::HasMany(items.clone()),
            Some(_) => Linkage::Malformed,
        }
    }
}

/// Relationship with another object
///
/// Wrapping never fails: a missing or malformed `data` member is only reported
/// when the linkage is read.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Relationship {
    object: StandardObject,
    #[serde(skip)]
    linkage: Linkage,
}

impl ObjectView for Relationship {
    fn object(&self) -> &StandardObject { &self.object }
}

impl MetaMember for Relationship {}

impl From<StandardObject> for Relationship {
    fn from(object: StandardObject) -> Self { Self::new(object) }
}

impl Relationship {
    pub fn new(object: StandardObject) -> Self {
        let linkage = Linkage::of(&object);
        Self { object, linkage }
    }

    /// `data` is an object or `null`
    pub fn is_has_one(&self) -> bool { matches!(self.linkage, Linkage::HasOne(_)) }

    /// `data` is an array
    pub fn is_has_many(&self) -> bool { matches!(self.linkage, Linkage::HasMany(_)) }

    pub fn has_identifier(&self) -> bool { matches!(self.linkage, Linkage::HasOne(Some(_))) }

    pub fn data(&self) -> WarrenResult<IdentifierData> {
        match &self.linkage {
            Linkage::HasMany(_) => Ok(IdentifierData::Multiple(self.identifiers()?)),
            Linkage::HasOne(None) => Ok(IdentifierData::Single(None)),
            Linkage::HasOne(Some(_)) => Ok(IdentifierData::Single(Some(self.identifier()?))),
            Linkage::Absent | Linkage::Malformed => {
                Err(WarrenError::InvalidRelationship("has-one or has-many"))
            },
        }
    }

    /// Fails when the relationship is not has-one, and separately when it is an
    /// empty (`null`) has-one
    pub fn identifier(&self) -> WarrenResult<ResourceIdentifier> {
        match &self.linkage {
            Linkage::HasOne(Some(object)) => Ok(object.clone().into()),
            Linkage::HasOne(None) => Err(WarrenError::EmptyRelationship),
            _ => Err(WarrenError::InvalidRelationship("has-one")),
        }
    }

    pub fn identifiers(&self) -> WarrenResult<ResourceIdentifierCollection> {
        match &self.linkage {
            Linkage::HasMany(items) => ResourceIdentifierCollection::create(items),
            _ => Err(WarrenError::InvalidRelationship("has-many")),
        }
    }

    pub fn links(&self) -> WarrenResult<Links> { links_from_member(self.object.get(keyword::LINKS)) }
}

/// The `relationships` member of a resource: relationship name to relationship object
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Relationships(StandardObject);

impl From<StandardObject> for Relationships {
    fn from(object: StandardObject) -> Self { Self(object) }
}

impl Relationships {
    pub fn has(&self, key: &str) -> bool { self.0.has(key) }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn relationship(&self, key: &str) -> WarrenResult<Relationship> {
        let member = || format!("Relationship \"{}\"", key);
        match self.0.get(key) {
            None => Err(WarrenError::not_present(member())),
            Some(Value::Object(map)) => Ok(Relationship::new(map.clone().into())),
            Some(_) => Err(WarrenError::invalid(member(), "an object")),
        }
    }

    /// Every relationship in document order; each call walks the backing object again
    pub fn all(&self) -> impl Iterator<Item = (&str, WarrenResult<Relationship>)> + '_ {
        self.0.keys().map(move |key| (key, self.relationship(key)))
    }
}
