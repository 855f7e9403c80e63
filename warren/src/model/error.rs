use crate::error::WarrenError;
use crate::model::link::{links_from_member, Link, Links};
use crate::model::Meta;
use crate::WarrenResult;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::iter::FromIterator;

pub const ID: &str = "id";
pub const LINKS: &str = "links";
pub const LINKS_ABOUT: &str = "about";
pub const STATUS: &str = "status";
pub const CODE: &str = "code";
pub const TITLE: &str = "title";
pub const DETAIL: &str = "detail";
pub const SOURCE: &str = "source";
pub const SOURCE_POINTER: &str = "pointer";
pub const SOURCE_PARAMETER: &str = "parameter";
pub const META: &str = "meta";

/// Error location
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ErrorSource {
    pub fn is_empty(&self) -> bool { self.pointer.is_none() && self.parameter.is_none() }
}

/// JSON-API Error
///
/// Unlike the document views this is a mutable value: errors are parsed from
/// responses but also assembled locally, piece by piece.
/// `status` and `code` are always kept as strings.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Error {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Links::is_empty")]
    links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "ErrorSource::is_empty")]
    source: ErrorSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

impl Error {
    pub fn new() -> Self { Default::default() }

    /// A new error with every member present in `input` applied
    pub fn create(input: &Value) -> WarrenResult<Error> {
        match input {
            Value::Object(map) => {
                let mut error = Error::new();
                error.exchange_array(map)?;
                Ok(error)
            },
            _ => Err(WarrenError::invalid_argument("Expecting an error object.")),
        }
    }

    pub fn create_many(inputs: &[Value]) -> WarrenResult<ErrorCollection> {
        inputs.iter().map(Error::create).collect()
    }

    pub fn id(&self) -> Option<&str> { self.id.as_deref() }

    pub fn has_id(&self) -> bool { self.id.is_some() }

    pub fn set_id<T: ToString>(&mut self, id: Option<T>) { self.id = id.map(|id| id.to_string()); }

    /// Accepts a string, an integer or `null`
    pub fn set_id_value(&mut self, id: &Value) -> WarrenResult<()> {
        self.id = string_or_integer(id, "error id")?;
        Ok(())
    }

    /// `None` when there are no links
    pub fn links(&self) -> Option<&Links> {
        if self.links.is_empty() {
            None
        } else {
            Some(&self.links)
        }
    }

    pub fn set_links(&mut self, links: Links) { self.links = links; }

    pub fn add_links(&mut self, links: Links) { self.links.extend(links); }

    pub fn add_link(&mut self, key: impl Into<String>, link: Link) {
        self.links.insert(key.into(), link);
    }

    pub fn set_about_link(&mut self, link: Link) { self.add_link(LINKS_ABOUT, link); }

    pub fn status(&self) -> Option<&str> { self.status.as_deref() }

    pub fn has_status(&self) -> bool { self.status.is_some() }

    pub fn set_status<T: ToString>(&mut self, status: Option<T>) {
        self.status = status.map(|status| status.to_string());
    }

    /// Accepts a string, an integer or `null`
    pub fn set_status_value(&mut self, status: &Value) -> WarrenResult<()> {
        self.status = string_or_integer(status, "error status")?;
        Ok(())
    }

    pub fn code(&self) -> Option<&str> { self.code.as_deref() }

    pub fn has_code(&self) -> bool { self.code.is_some() }

    pub fn set_code<T: ToString>(&mut self, code: Option<T>) {
        self.code = code.map(|code| code.to_string());
    }

    /// Accepts a string, an integer or `null`
    pub fn set_code_value(&mut self, code: &Value) -> WarrenResult<()> {
        self.code = string_or_integer(code, "error code")?;
        Ok(())
    }

    pub fn title(&self) -> Option<&str> { self.title.as_deref() }

    pub fn has_title(&self) -> bool { self.title.is_some() }

    pub fn set_title<T: Into<String>>(&mut self, title: Option<T>) { self.title = title.map(Into::into); }

    /// Accepts a string or `null`
    pub fn set_title_value(&mut self, title: &Value) -> WarrenResult<()> {
        self.title = string_or_null(title, "error title")?;
        Ok(())
    }

    pub fn detail(&self) -> Option<&str> { self.detail.as_deref() }

    pub fn has_detail(&self) -> bool { self.detail.is_some() }

    pub fn set_detail<T: Into<String>>(&mut self, detail: Option<T>) {
        self.detail = detail.map(Into::into);
    }

    /// Accepts a string or `null`
    pub fn set_detail_value(&mut self, detail: &Value) -> WarrenResult<()> {
        self.detail = string_or_null(detail, "error detail")?;
        Ok(())
    }

    /// `None` when neither pointer nor parameter is set
    pub fn source(&self) -> Option<&ErrorSource> {
        if self.source.is_empty() {
            None
        } else {
            Some(&self.source)
        }
    }

    pub fn set_source(&mut self, source: ErrorSource) { self.source = source; }

    /// Replaces the source with the `pointer`/`parameter` members of `source`;
    /// `null` clears it
    pub fn set_source_value(&mut self, source: &Value) -> WarrenResult<()> {
        match source {
            Value::Null => self.source = ErrorSource::default(),
            Value::Object(map) => {
                self.source = ErrorSource {
                    pointer: map
                        .get(SOURCE_POINTER)
                        .map(|pointer| string_or_null(pointer, "error source pointer"))
                        .transpose()?
                        .flatten(),
                    parameter: map
                        .get(SOURCE_PARAMETER)
                        .map(|parameter| string_or_null(parameter, "error source parameter"))
                        .transpose()?
                        .flatten(),
                };
            },
            _ => return Err(WarrenError::invalid_argument("Expecting error source to be an object.")),
        }
        Ok(())
    }

    pub fn source_pointer(&self) -> Option<&str> { self.source.pointer.as_deref() }

    pub fn has_source_pointer(&self) -> bool { self.source.pointer.is_some() }

    /// `None` removes the pointer
    pub fn set_source_pointer<T: Into<String>>(&mut self, pointer: Option<T>) {
        self.source.pointer = pointer.map(Into::into);
    }

    pub fn source_parameter(&self) -> Option<&str> { self.source.parameter.as_deref() }

    pub fn has_source_parameter(&self) -> bool { self.source.parameter.is_some() }

    /// `None` removes the parameter
    pub fn set_source_parameter<T: Into<String>>(&mut self, parameter: Option<T>) {
        self.source.parameter = parameter.map(Into::into);
    }

    pub fn meta(&self) -> Option<&Meta> { self.meta.as_ref() }

    pub fn set_meta(&mut self, meta: Option<Meta>) { self.meta = meta; }

    /// Deep-merges `meta` over the current meta
    pub fn add_meta(&mut self, meta: Meta) {
        match &mut self.meta {
            Some(current) => merge_recursive(current, meta),
            None => self.meta = Some(meta),
        }
    }

    /// Copies over every member of `other` that is set to a non-empty value;
    /// members `other` leaves empty never erase ours
    pub fn merge(&mut self, other: &Error) {
        if let Some(id) = other.id().filter(|id| is_truthy(id)) {
            self.id = Some(id.to_string());
        }
        if let Some(links) = other.links() {
            self.add_links(links.clone());
        }
        if let Some(status) = other.status().filter(|status| is_truthy(status)) {
            self.status = Some(status.to_string());
        }
        if let Some(code) = other.code().filter(|code| is_truthy(code)) {
            self.code = Some(code.to_string());
        }
        if let Some(title) = other.title().filter(|title| is_truthy(title)) {
            self.title = Some(title.to_string());
        }
        if let Some(detail) = other.detail().filter(|detail| is_truthy(detail)) {
            self.detail = Some(detail.to_string());
        }
        if let Some(source) = other.source() {
            self.source = source.clone();
        }
        if let Some(meta) = other.meta().filter(|meta| !meta.is_empty()) {
            self.add_meta(meta.clone());
        }
    }

    /// Applies the members present in `input`, leaving every absent member untouched
    pub fn exchange_array(&mut self, input: &Map<String, Value>) -> WarrenResult<()> {
        if let Some(id) = input.get(ID) {
            self.set_id_value(id)?;
        }
        if input.contains_key(LINKS) {
            self.add_links(links_from_member(input.get(LINKS)).map_err(|_| {
                WarrenError::invalid_argument("Expecting links to contain link objects.")
            })?);
        }
        if let Some(status) = input.get(STATUS) {
            self.set_status_value(status)?;
        }
        if let Some(code) = input.get(CODE) {
            self.set_code_value(code)?;
        }
        if let Some(title) = input.get(TITLE) {
            self.set_title_value(title)?;
        }
        if let Some(detail) = input.get(DETAIL) {
            self.set_detail_value(detail)?;
        }
        if let Some(source) = input.get(SOURCE) {
            self.set_source_value(source)?;
        }
        if let Some(pointer) = input.get(SOURCE_POINTER) {
            self.source.pointer = string_or_null(pointer, "error source pointer")?;
        }
        if let Some(parameter) = input.get(SOURCE_PARAMETER) {
            self.source.parameter = string_or_null(parameter, "error source parameter")?;
        }
        match input.get(META) {
            None => {},
            Some(Value::Null) => self.add_meta(Meta::new()),
            Some(Value::Object(meta)) => self.add_meta(meta.clone()),
            Some(_) => return Err(WarrenError::invalid_argument("Expecting error meta to be an object.")),
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Error::create(&value).map_err(de::Error::custom)
    }
}

/// Errors in the order they were reported; no deduplication
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ErrorCollection(Vec<Error>);

impl ErrorCollection {
    pub fn new() -> Self { Default::default() }

    pub fn add(&mut self, error: Error) { self.0.push(error); }

    pub fn get(&self, index: usize) -> Option<&Error> { self.0.get(index) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> { self.0.iter() }
}

impl From<Vec<Error>> for ErrorCollection {
    fn from(errors: Vec<Error>) -> Self { Self(errors) }
}

impl FromIterator<Error> for ErrorCollection {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

impl IntoIterator for ErrorCollection {
    type IntoIter = std::vec::IntoIter<Error>;
    type Item = Error;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type IntoIter = std::slice::Iter<'a, Error>;
    type Item = &'a Error;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Empty strings and `"0"` carry no value when merging
fn is_truthy(value: &str) -> bool { !value.is_empty() && value != "0" }

fn string_or_integer(value: &Value, name: &str) -> WarrenResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Some(n.to_string())),
        _ => Err(WarrenError::invalid_argument(format!(
            "Expecting {} to be a string, integer or null.",
            name
        ))),
    }
}

fn string_or_null(value: &Value, name: &str) -> WarrenResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(WarrenError::invalid_argument(format!("Expecting {} to be a string or null.", name))),
    }
}

fn merge_recursive(target: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        if let Value::Object(incoming) = &value {
            if let Some(Value::Object(existing)) = target.get_mut(&key) {
                merge_recursive(existing, incoming.clone());
                continue;
            }
        }
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_and_code_are_strings() {
        let mut error = Error::new();
        error.set_status(Some(404));
        error.set_code_value(&json!(1234)).unwrap();
        assert_eq!(error.status(), Some("404"));
        assert_eq!(error.code(), Some("1234"));

        error.set_status(None::<u16>);
        assert!(!error.has_status());
    }

    #[test]
    fn dynamic_setters_validate() {
        let mut error = Error::new();
        assert!(error.set_id_value(&json!(1.5)).is_err());
        assert!(error.set_status_value(&json!(true)).is_err());
        assert!(error.set_code_value(&json!([])).is_err());
        assert!(error.set_title_value(&json!(1)).is_err());
        assert!(error.set_detail_value(&json!({})).is_err());
        assert!(error.set_title_value(&Value::Null).is_ok());
    }

    #[test]
    fn source_members_are_removed_by_none() {
        let mut error = Error::new();
        error.set_source_pointer(Some("/data/attributes/title"));
        error.set_source_parameter(Some("include"));
        assert_eq!(error.source_pointer(), Some("/data/attributes/title"));

        error.set_source_pointer(None::<String>);
        assert!(!error.has_source_pointer());
        assert_eq!(error.source().unwrap().parameter.as_deref(), Some("include"));

        error.set_source_parameter(None::<String>);
        assert!(error.source().is_none());
        assert_eq!(serde_json::to_value(&error).unwrap(), json!({}));
    }

    #[test]
    fn meta_is_merged_deeply() {
        let mut error = Error::new();
        error.add_meta(json!({ "a": { "b": 1, "c": 2 }, "d": 3 }).as_object().unwrap().clone());
        error.add_meta(json!({ "a": { "c": 20, "e": 5 } }).as_object().unwrap().clone());
        assert_eq!(
            Value::Object(error.meta().unwrap().clone()),
            json!({ "a": { "b": 1, "c": 20, "e": 5 }, "d": 3 })
        );
    }

    #[test]
    fn zero_and_empty_values_do_not_merge() {
        let mut target = Error::create(&json!({ "status": "404", "code": "E1" })).unwrap();
        let source = Error::create(&json!({ "status": "0", "code": "", "title": "Not Found" })).unwrap();
        target.merge(&source);
        assert_eq!(target.status(), Some("404"));
        assert_eq!(target.code(), Some("E1"));
        assert_eq!(target.title(), Some("Not Found"));
    }

    #[test]
    fn top_level_pointer_and_parameter() {
        let error = Error::create(&json!({ "pointer": "/data", "parameter": "sort" })).unwrap();
        assert_eq!(error.source_pointer(), Some("/data"));
        assert_eq!(error.source_parameter(), Some("sort"));
    }

    #[test]
    fn create_rejects_non_objects() {
        assert!(Error::create(&json!("oops")).is_err());
        assert!(Error::create_many(&[json!({}), json!(1)]).is_err());
        assert!(Error::create(&json!({ "links": { "about": 5 } })).is_err());
    }
}
