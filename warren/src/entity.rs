use crate::error::WarrenError;
use crate::model::identifier::{IdentifierData, ResourceIdentifier};
use crate::model::keyword;
use crate::query::FieldsQuery;
use crate::WarrenResult;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::iter::FromIterator;

lazy_static! {
    static ref INVALID_ATTR_FIELDS: HashSet<&'static str> = HashSet::from_iter(vec![
        keyword::RELATIONSHIPS,
        keyword::LINKS,
        keyword::TYPE,
        keyword::ID
    ]);
}

pub type Attributes = Map<String, Value>;
pub type RelationshipLinkage = BTreeMap<String, IdentifierData>;

/// A local record that can be sent to a JSON:API server
pub trait Entity {
    /// The JSON:API resource type
    fn ty(&self) -> String;
    /// `None` for records the server has not assigned an id to yet
    fn id(&self) -> Option<String>;
    fn attributes(&self) -> WarrenResult<Attributes>;
    fn relationships(&self) -> WarrenResult<RelationshipLinkage> { Ok(Default::default()) }

    fn to_resource_identifier(&self) -> Option<ResourceIdentifier> {
        self.id().map(|id| ResourceIdentifier::new(self.ty(), id))
    }
}

/// Serializes `record` and keeps its members as attributes, minus the names
/// JSON:API reserves for the resource object itself
pub fn attributes_of<T: Serialize>(record: &T) -> WarrenResult<Attributes> {
    match serde_json::to_value(record)? {
        Value::Object(mut map) => {
            for &f in &INVALID_ATTR_FIELDS as &HashSet<&str> {
                map.remove(f);
            }
            Ok(map)
        },
        _ => Err(WarrenError::invalid_argument("Provided data entity is not an object.")),
    }
}

/// Turns an outgoing record into a JSON:API request body
pub trait Serializer {
    /// `fields` restricts, per resource type, which attributes and
    /// relationships are written
    fn serialize_data(&self, record: &dyn Entity, fields: Option<&FieldsQuery>) -> WarrenResult<Value>;
}

/// Writes `{ "data": <resource object> }`
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentSerializer;

impl Serializer for DocumentSerializer {
    fn serialize_data(&self, record: &dyn Entity, fields: Option<&FieldsQuery>) -> WarrenResult<Value> {
        let ty = record.ty();
        let mut attributes = record.attributes()?;
        let mut relationships = record.relationships()?;

        if let Some(fieldset) = fields.and_then(|fields| fields.get(&ty)) {
            attributes.retain(|k, _| fieldset.contains(k));
            relationships.retain(|k, _| fieldset.contains(k));
        }

        let mut resource = Map::new();
        resource.insert(keyword::TYPE.into(), Value::String(ty));
        if let Some(id) = record.id() {
            resource.insert(keyword::ID.into(), Value::String(id));
        }
        if !attributes.is_empty() {
            resource.insert(keyword::ATTRIBUTES.into(), Value::Object(attributes));
        }
        if !relationships.is_empty() {
            let mut relats = Map::new();
            for (name, linkage) in relationships {
                let mut relat = Map::new();
                relat.insert(keyword::DATA.into(), serde_json::to_value(&linkage)?);
                relats.insert(name, Value::Object(relat));
            }
            resource.insert(keyword::RELATIONSHIPS.into(), Value::Object(relats));
        }

        let mut document = Map::new();
        document.insert(keyword::DATA.into(), Value::Object(resource));
        Ok(Value::Object(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Dog {
        id: String,
        name: String,
        age: i32,
    }

    impl Entity for Dog {
        fn ty(&self) -> String { "dogs".into() }

        fn id(&self) -> Option<String> { Some(self.id.clone()) }

        fn attributes(&self) -> WarrenResult<Attributes> { attributes_of(self) }
    }

    #[test]
    fn reserved_members_are_not_attributes() {
        let dog = Dog { id: "1".into(), name: "Rex".into(), age: 3 };
        let attrs = attributes_of(&dog).unwrap();
        assert!(!attrs.contains_key("id"));
        assert_eq!(attrs.get("name"), Some(&json!("Rex")));
        assert!(attributes_of(&5).is_err());
    }

    #[test]
    fn fieldset_restricts_attributes() {
        let dog = Dog { id: "1".into(), name: "Rex".into(), age: 3 };
        let mut fields = FieldsQuery::new();
        fields.insert("dogs".into(), vec!["age".into()]);

        let doc = DocumentSerializer.serialize_data(&dog, Some(&fields)).unwrap();
        assert_eq!(doc, json!({ "data": { "type": "dogs", "id": "1", "attributes": { "age": 3 } } }));
    }
}
