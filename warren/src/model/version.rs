use crate::error::WarrenError;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref VERSION_REGEX: Regex = Regex::new(r#"^(?P<major>\d+)\.(?P<minor>\d+)$"#).unwrap();
}

/// The `major.minor` version a JSON:API server claims to implement
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct JsonApiVersion {
    pub major: u8,
    pub minor: u8,
}

impl JsonApiVersion {
    pub const V1_0: JsonApiVersion = JsonApiVersion { major: 1, minor: 0 };
    pub const V1_1: JsonApiVersion = JsonApiVersion { major: 1, minor: 1 };
}

impl Default for JsonApiVersion {
    fn default() -> Self { Self::V1_0 }
}

impl fmt::Display for JsonApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for JsonApiVersion {
    type Err = WarrenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(caps) = VERSION_REGEX.captures(s) {
            if let (Some(major), Some(minor)) = (caps.name("major"), caps.name("minor")) {
                if let (Ok(major), Ok(minor)) =
                    (major.as_str().parse::<u8>(), minor.as_str().parse::<u8>())
                {
                    return Ok(JsonApiVersion { major, minor });
                }
            }
        }
        Err(WarrenError::InvalidJsonApiVersion(s.into()))
    }
}

impl Serialize for JsonApiVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonApiVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
