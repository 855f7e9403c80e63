use crate::error::WarrenError;
use crate::model::Meta;
use crate::WarrenResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

pub type Links = HashMap<String, Link>;

/// A link member: either a bare URI or a `{ href, meta }` object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Link {
    #[serde(with = "http_serde::uri")]
    Raw(http::Uri),
    Object {
        #[serde(with = "http_serde::uri")]
        href: http::Uri,
        #[serde(skip_serializing_if = "Meta::is_empty")]
        #[serde(default)]
        meta: Meta,
    },
}

impl FromStr for Link {
    type Err = http::uri::InvalidUri;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Link::Raw(s.parse()?)) }
}

impl From<http::Uri> for Link {
    fn from(r: http::Uri) -> Self { Link::Raw(r) }
}

impl From<&Link> for http::Uri {
    fn from(link: &Link) -> Self { link.href().to_owned() }
}

impl Link {
    pub fn href(&self) -> &http::Uri {
        match self {
            Link::Raw(raw) => raw,
            Link::Object { href, .. } => href,
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        match self {
            Link::Raw(_) => None,
            Link::Object { meta, .. } => Some(meta),
        }
    }

    /// Accepts a URI string or a link object
    pub fn from_value(value: &Value) -> WarrenResult<Link> {
        match value {
            Value::String(uri) => uri.parse::<Link>().map_err(|err| {
                WarrenError::invalid_argument(format!("invalid link `{}`: {}", uri, err))
            }),
            Value::Object(_) => serde_json::from_value(value.clone()).map_err(|_| {
                WarrenError::invalid_argument("Expecting links to contain link objects.")
            }),
            _ => Err(WarrenError::invalid_argument("Expecting links to contain link objects.")),
        }
    }
}

/// Reads an optional `links` member: absent or `null` gives no links, anything
/// other than an object of links fails. A `null` link (such as an unavailable
/// `prev` page) is left out
pub fn links_from_member(value: Option<&Value>) -> WarrenResult<Links> {
    match value {
        None | Some(Value::Null) => Ok(Default::default()),
        Some(Value::Object(map)) => map
            .iter()
            .filter(|(_, link)| !link.is_null())
            .map(|(key, link)| Ok((key.clone(), Link::from_value(link)?)))
            .collect(),
        Some(_) => Err(WarrenError::invalid("Links", "an object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_and_object_links() {
        let raw = Link::from_value(&json!("http://example.com/articles/1")).unwrap();
        assert_eq!(raw.href(), "http://example.com/articles/1");
        assert!(raw.meta().is_none());

        let object = Link::from_value(&json!({
            "href": "http://example.com/articles/1/comments",
            "meta": { "count": 10 }
        }))
        .unwrap();
        assert_eq!(object.href(), "http://example.com/articles/1/comments");
        assert_eq!(object.meta().unwrap().get("count"), Some(&json!(10)));
    }

    #[test]
    fn invalid_links() {
        assert!(Link::from_value(&json!(12)).is_err());
        assert!(Link::from_value(&json!({ "meta": {} })).is_err());
        assert!(links_from_member(Some(&json!([]))).is_err());
        assert!(links_from_member(None).unwrap().is_empty());
    }

    #[test]
    fn null_links_are_left_out() {
        let links = links_from_member(Some(&json!({
            "first": "http://example.com/articles?page[offset]=0",
            "prev": null
        })))
        .unwrap();
        assert_eq!(links.len(), 1);
        assert!(!links.contains_key("prev"));
        assert_eq!(links["first"].href().query(), Some("page[offset]=0"));
        assert!(links_from_member(Some(&json!({ "prev": false }))).is_err());
    }
}
