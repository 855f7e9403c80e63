pub mod document;
pub mod error;
pub mod identifier;
pub mod link;
pub mod object;
pub mod relationship;
pub mod resource;
pub mod version;

use crate::model::version::JsonApiVersion;
use serde_json::{Map, Value};

/// Meta-data object, can contain any data
pub type Meta = Map<String, Value>;

/// Member names reserved by JSON:API
pub mod keyword {
    pub const DATA: &str = "data";
    pub const INCLUDED: &str = "included";
    pub const ERRORS: &str = "errors";
    pub const META: &str = "meta";
    pub const LINKS: &str = "links";
    pub const JSONAPI: &str = "jsonapi";
    pub const TYPE: &str = "type";
    pub const ID: &str = "id";
    pub const ATTRIBUTES: &str = "attributes";
    pub const RELATIONSHIPS: &str = "relationships";
}

/// Optional top-level `jsonapi` member identifying the JSON:API version the server implements
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct JsonApiInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub version: Option<JsonApiVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub meta: Option<Meta>,
}
