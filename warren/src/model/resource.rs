use crate::error::WarrenError;
use crate::model::identifier::{ResourceIdentifier, ResourceIdentifierCollection};
use crate::model::keyword;
use crate::model::link::{links_from_member, Links};
use crate::model::object::{Identifiable, MetaMember, ObjectView, StandardObject};
use crate::model::relationship::{Relationship, Relationships};
use crate::WarrenResult;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON-API Resource
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ResourceObject(StandardObject);

impl ObjectView for ResourceObject {
    fn object(&self) -> &StandardObject { &self.0 }
}

impl Identifiable for ResourceObject {}
impl MetaMember for ResourceObject {}

impl From<StandardObject> for ResourceObject {
    fn from(object: StandardObject) -> Self { Self(object) }
}

impl ResourceObject {
    pub fn from_value(value: Value) -> WarrenResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map.into())),
            _ => Err(WarrenError::invalid_argument("Expecting only resource objects.")),
        }
    }

    /// A standalone identifier built from this resource's `type` and `id`
    pub fn identifier(&self) -> WarrenResult<ResourceIdentifier> {
        Ok(ResourceIdentifier::new(self.ty()?, self.id()?))
    }

    pub fn has_attributes(&self) -> bool { self.0.has(keyword::ATTRIBUTES) }

    /// An absent `attributes` member reads as an empty object
    pub fn attributes(&self) -> WarrenResult<StandardObject> {
        match self.0.get(keyword::ATTRIBUTES) {
            None => Ok(StandardObject::new()),
            Some(Value::Object(map)) => Ok(map.clone().into()),
            Some(_) => Err(WarrenError::invalid("Attributes", "an object")),
        }
    }

    /// Deserializes the attributes into a caller type
    pub fn attributes_as<T: DeserializeOwned>(&self) -> WarrenResult<T> {
        Ok(serde_json::from_value(self.attributes()?.into())?)
    }

    pub fn has_relationships(&self) -> bool { self.0.has(keyword::RELATIONSHIPS) }

    /// An absent or `null` `relationships` member reads as no relationships
    pub fn relationships(&self) -> WarrenResult<Relationships> {
        match self.0.get(keyword::RELATIONSHIPS) {
            None | Some(Value::Null) => Ok(Relationships::default()),
            Some(Value::Object(map)) => Ok(StandardObject::from(map.clone()).into()),
            Some(_) => Err(WarrenError::invalid("Relationships", "an object")),
        }
    }

    /// `Ok(None)` when there is no relationship named `key`; `Err` when the
    /// `relationships` member or the named relationship is malformed
    pub fn relationship(&self, key: &str) -> WarrenResult<Option<Relationship>> {
        let relationships = self.relationships()?;
        if relationships.has(key) {
            relationships.relationship(key).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn links(&self) -> WarrenResult<Links> { links_from_member(self.0.get(keyword::LINKS)) }
}

/// Ordered set of resources, unique by `(type, id)`; the first resource added wins
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ResourceObjectCollection {
    stack: Vec<ResourceObject>,
}

impl ResourceObjectCollection {
    pub fn new() -> Self { Default::default() }

    /// Wraps every item of a decoded JSON array
    pub fn create(values: &[Value]) -> WarrenResult<Self> {
        let mut collection = Self::new();
        for value in values {
            collection.add(ResourceObject::from_value(value.clone())?)?;
        }
        Ok(collection)
    }

    /// Fails when `resource` has no valid identifier
    pub fn add(&mut self, resource: ResourceObject) -> WarrenResult<()> {
        let identifier = resource.identifier()?;
        if !self.has(&identifier) {
            self.stack.push(resource);
        }
        Ok(())
    }

    pub fn add_many(
        &mut self, resources: impl IntoIterator<Item = ResourceObject>,
    ) -> WarrenResult<()> {
        for resource in resources {
            self.add(resource)?;
        }
        Ok(())
    }

    pub fn has(&self, identifier: &ResourceIdentifier) -> bool { self.find(identifier).is_some() }

    /// Fails on an incomplete identifier before looking anything up
    pub fn get(&self, identifier: &ResourceIdentifier) -> WarrenResult<&ResourceObject> {
        let key = identifier.key()?;
        self.find(identifier).ok_or(WarrenError::ResourceNotFound(key))
    }

    fn find(&self, identifier: &ResourceIdentifier) -> Option<&ResourceObject> {
        self.stack.iter().find(|resource| {
            resource.identifier().map(|own| own.is_same(identifier)).unwrap_or(false)
        })
    }

    pub fn identifiers(&self) -> ResourceIdentifierCollection {
        self.stack.iter().filter_map(|resource| resource.identifier().ok()).collect()
    }

    pub fn len(&self) -> usize { self.stack.len() }

    pub fn is_empty(&self) -> bool { self.stack.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceObject> { self.stack.iter() }
}

impl IntoIterator for ResourceObjectCollection {
    type IntoIter = std::vec::IntoIter<ResourceObject>;
    type Item = ResourceObject;

    fn into_iter(self) -> Self::IntoIter { self.stack.into_iter() }
}

impl<'a> IntoIterator for &'a ResourceObjectCollection {
    type IntoIter = std::slice::Iter<'a, ResourceObject>;
    type Item = &'a ResourceObject;

    fn into_iter(self) -> Self::IntoIter { self.stack.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: Value) -> ResourceObject { ResourceObject::from_value(value).unwrap() }

    #[test]
    fn optional_members_default_to_empty() {
        let res = resource(json!({ "type": "posts", "id": "1" }));
        assert!(res.attributes().unwrap().is_empty());
        assert!(res.relationships().unwrap().is_empty());
        assert!(res.meta().unwrap().is_empty());
        assert!(res.links().unwrap().is_empty());
        assert_eq!(res.relationship("author").unwrap(), None);
    }

    #[test]
    fn malformed_members_fail() {
        let res = resource(json!({
            "type": "posts", "id": "1", "attributes": [], "relationships": "x"
        }));
        assert!(res.attributes().is_err());
        assert!(res.relationships().is_err());
        assert!(res.relationship("author").is_err());
    }

    #[test]
    fn identifier_is_detached() {
        let res = resource(json!({ "type": "posts", "id": "1", "attributes": { "title": "x" } }));
        let identifier = res.identifier().unwrap();
        drop(res);
        assert_eq!(identifier.to_string(), "posts:1");
        assert!(!identifier.has("attributes"));
    }

    #[test]
    fn collection_keeps_the_first_duplicate() {
        let collection = ResourceObjectCollection::create(&[
            json!({ "type": "posts", "id": "1", "attributes": { "title": "first" } }),
            json!({ "type": "posts", "id": "1", "attributes": { "title": "second" } }),
            json!({ "type": "posts", "id": "2" }),
        ])
        .unwrap();

        assert_eq!(collection.len(), 2);
        let first = collection.get(&ResourceIdentifier::new("posts", "1")).unwrap();
        assert_eq!(first.attributes().unwrap().get_str("title"), Some("first"));
        assert!(matches!(
            collection.get(&ResourceIdentifier::new("posts", "3")),
            Err(WarrenError::ResourceNotFound(key)) if key == "posts:3"
        ));
        let partial = ResourceIdentifier::from_value(json!({ "type": "posts" })).unwrap();
        assert!(matches!(collection.get(&partial), Err(WarrenError::MemberNotPresent(_))));

        let ids = collection.identifiers();
        assert_eq!(ids.ids().unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn collection_rejects_unidentifiable_items() {
        assert!(ResourceObjectCollection::create(&[json!("posts:1")]).is_err());
        assert!(ResourceObjectCollection::create(&[json!({ "type": "posts" })]).is_err());
    }
}
