use crate::WarrenResult;
use itertools::Itertools;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::BTreeMap;

pub type IncludeQuery = Vec<String>;
pub type FieldsQuery = BTreeMap<String, Vec<String>>;

pub const PARAM_INCLUDE: &str = "include";
pub const PARAM_FIELDS: &str = "fields";

const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',')
    .remove(b'[')
    .remove(b']');

lazy_static! {
    static ref KEY_REGEX: Regex = Regex::new(r#"(?P<name>\w+)\[(?P<param>[\w\-_@]+)\]"#).unwrap();
}

/// The `include` and sparse fieldset parameters of a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodingParameters {
    /// Relationship paths to include, in request order
    pub include: IncludeQuery,
    /// Resource type to the fields that should be returned for it
    pub fields: FieldsQuery,
}

impl EncodingParameters {
    pub fn new() -> Self { Default::default() }

    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.include.push(path.into());
        self
    }

    pub fn fields<I, S>(mut self, ty: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.entry(ty.into()).or_default().extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.fields.values().all(Vec::is_empty)
    }

    /// Decoded `(key, value)` pairs; members without a value are left out
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![];
        if !self.include.is_empty() {
            pairs.push((PARAM_INCLUDE.to_string(), self.include.iter().join(",")));
        }
        for (ty, fields) in self.fields.iter().filter(|(_, fields)| !fields.is_empty()) {
            pairs.push((format!("{}[{}]", PARAM_FIELDS, ty), fields.iter().join(",")));
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_COMPONENT),
                    utf8_percent_encode(v, QUERY_COMPONENT)
                )
            })
            .join("&")
    }

    /// Reads the parameters back from a query string; unrelated parameters are ignored.
    /// Keys and values are decoded after splitting, so an encoded `&` or `=` stays in place
    pub fn from_query(query: &str) -> WarrenResult<Self> {
        let mut params = Self::new();

        for pair in query.split('&') {
            let kv_pair: Vec<&str> = pair.splitn(2, '=').collect();
            if kv_pair.len() != 2 || kv_pair[0].is_empty() {
                continue;
            }
            let key = percent_decode_str(kv_pair[0]).decode_utf8()?;
            let value = percent_decode_str(kv_pair[1]).decode_utf8()?;

            if key == PARAM_INCLUDE {
                params.include.extend(value.split(',').filter(|s| !s.is_empty()).map(ToString::to_string));
                continue;
            }

            if let Some(cap) = KEY_REGEX.captures(&key) {
                if let (Some(name), Some(param)) = (cap.name("name"), cap.name("param")) {
                    if name.as_str() == PARAM_FIELDS {
                        params = params.fields(
                            param.as_str(),
                            value.split(',').filter(|s| !s.is_empty()),
                        );
                    }
                }
            }
        }

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_members_are_omitted() {
        let params = EncodingParameters::new().fields("people", Vec::<String>::new());
        assert!(params.is_empty());
        assert!(params.to_query_pairs().is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn include_and_fields() {
        let params = EncodingParameters::new()
            .include("author")
            .include("comments.author")
            .fields("people", vec!["name", "email"])
            .fields("articles", vec!["title"]);

        assert_eq!(
            params.to_query_string(),
            "include=author,comments.author&fields[articles]=title&fields[people]=name,email"
        );
        assert_eq!(EncodingParameters::from_query(&params.to_query_string()).unwrap(), params);
    }

    #[test]
    fn values_are_encoded() {
        let params = EncodingParameters::new().fields("people", vec!["first name"]);
        assert_eq!(params.to_query_string(), "fields[people]=first%20name");
        let parsed = EncodingParameters::from_query("fields%5Bpeople%5D=first%20name&sort=-age").unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn encoded_separators_stay_in_values() {
        let params = EncodingParameters::new().fields("people", vec!["a&b", "c=d"]);
        assert_eq!(params.to_query_string(), "fields[people]=a%26b,c%3Dd");

        let parsed = EncodingParameters::from_query(&params.to_query_string()).unwrap();
        assert_eq!(parsed.fields["people"], vec!["a&b", "c=d"]);
        assert_eq!(parsed, params);
    }
}
