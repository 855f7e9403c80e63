use crate::error::WarrenError;
use crate::model::error::{Error, ErrorCollection};
use crate::model::keyword;
use crate::model::link::{links_from_member, Links};
use crate::model::object::{MetaMember, ObjectView, StandardObject};
use crate::model::relationship::Relationship;
use crate::model::resource::{ResourceObject, ResourceObjectCollection};
use crate::model::JsonApiInfo;
use crate::WarrenResult;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::convert::TryFrom;
use std::str::FromStr;

/// The legal shapes of a present `data` member
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryData {
    Null,
    Single(StandardObject),
    Multiple(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
enum DataMember {
    Absent,
    Present(PrimaryData),
    Malformed,
}

impl DataMember {
    fn of(object: &StandardObject) -> Self {
        match object.get(keyword::DATA) {
            None => DataMember::Absent,
            Some(Value::Null) => DataMember::Present(PrimaryData::Null),
            Some(Value::Object(map)) => DataMember::Present(PrimaryData::Single(map.clone().into())),
            Some(Value::Array(items)) => DataMember::Present(PrimaryData::Multiple(items.clone())),
            Some(_) => DataMember::Malformed,
        }
    }
}

/// A top-level JSON:API document
///
/// The shape of `data` decides which accessor is legal: [`Document::resource`]
/// needs an object, [`Document::resources`] needs an array.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Document {
    object: StandardObject,
    #[serde(skip)]
    data: DataMember,
}

impl ObjectView for Document {
    fn object(&self) -> &StandardObject { &self.object }
}

impl MetaMember for Document {}

impl From<StandardObject> for Document {
    fn from(object: StandardObject) -> Self {
        let data = DataMember::of(&object);
        Self { object, data }
    }
}

impl TryFrom<Value> for Document {
    type Error = WarrenError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(StandardObject::from_value(value, "Document")?.into())
    }
}

impl FromStr for Document {
    type Err = WarrenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_slice(s.as_bytes()) }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Document::try_from(value).map_err(de::Error::custom)
    }
}

impl Document {
    /// Decodes a message body. Malformed JSON fails here, before any shape checks
    pub fn from_slice(body: &[u8]) -> WarrenResult<Self> {
        let value: Value = serde_json::from_slice(body)?;
        trace!("decoded JSON:API document of {} bytes", body.len());
        Document::try_from(value)
    }

    pub fn has_data(&self) -> bool { self.data != DataMember::Absent }

    pub fn data(&self) -> WarrenResult<&PrimaryData> {
        match &self.data {
            DataMember::Present(data) => Ok(data),
            DataMember::Absent => Err(WarrenError::not_present("Data")),
            DataMember::Malformed => Err(WarrenError::invalid("Data", "an object, an array or null")),
        }
    }

    pub fn resource(&self) -> WarrenResult<ResourceObject> {
        match &self.data {
            DataMember::Present(PrimaryData::Single(object)) => Ok(object.clone().into()),
            DataMember::Absent => Err(WarrenError::not_present("Data")),
            _ => Err(WarrenError::invalid("Data", "an object")),
        }
    }

    pub fn resources(&self) -> WarrenResult<ResourceObjectCollection> {
        match &self.data {
            DataMember::Present(PrimaryData::Multiple(items)) => ResourceObjectCollection::create(items),
            DataMember::Absent => Err(WarrenError::not_present("Data")),
            _ => Err(WarrenError::invalid("Data", "an array")),
        }
    }

    /// Reads the whole document as a relationship object, as returned by a
    /// relationship endpoint
    pub fn relationship(&self) -> Relationship { Relationship::new(self.object.clone()) }

    /// `None` when the member is absent, which is not the same as an empty `included` array
    pub fn included(&self) -> WarrenResult<Option<ResourceObjectCollection>> {
        match self.object.get(keyword::INCLUDED) {
            None => Ok(None),
            Some(Value::Array(items)) => ResourceObjectCollection::create(items).map(Some),
            Some(_) => Err(WarrenError::invalid("Included", "an array")),
        }
    }

    pub fn has_errors(&self) -> bool { self.object.has(keyword::ERRORS) }

    /// `None` when the member is absent
    pub fn errors(&self) -> WarrenResult<Option<ErrorCollection>> {
        match self.object.get(keyword::ERRORS) {
            None => Ok(None),
            Some(Value::Array(items)) => Error::create_many(items).map(Some),
            Some(_) => Err(WarrenError::invalid("Errors", "an array")),
        }
    }

    pub fn links(&self) -> WarrenResult<Links> { links_from_member(self.object.get(keyword::LINKS)) }

    pub fn jsonapi(&self) -> WarrenResult<Option<JsonApiInfo>> {
        match self.object.get(keyword::JSONAPI) {
            None | Some(Value::Null) => Ok(None),
            Some(info @ Value::Object(_)) => Ok(Some(serde_json::from_value(info.clone())?)),
            Some(_) => Err(WarrenError::invalid("Jsonapi", "an object")),
        }
    }
}
