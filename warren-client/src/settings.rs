use crate::error::{ClientError, ClientResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::TryFrom;
use warren::model::version::JsonApiVersion;

pub const ENV_PREFIX: &str = "WARREN";

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettingsModel {
    pub base_uri: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub jsonapi: JsonApiSettings,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct JsonApiSettings {
    #[serde(default)]
    pub version: JsonApiVersion,
}

impl ClientSettingsModel {
    /// Reads `file_name` (any format `config` knows, extension optional), then
    /// lets `WARREN_*` environment variables override it. Nested keys use `__`,
    /// as in `WARREN_JSONAPI__VERSION`
    pub fn from_file(file_name: &str) -> ClientResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file_name))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Always ends with `/`, so endpoints are joined below it
    pub base_uri: url::Url,
    pub api_key: Option<String>,
    pub token: Option<String>,
    pub headers: HashMap<String, String>,
    pub version: JsonApiVersion,
}

impl TryFrom<ClientSettingsModel> for ClientSettings {
    type Error = ClientError;

    fn try_from(value: ClientSettingsModel) -> Result<Self, Self::Error> {
        let ClientSettingsModel { base_uri, api_key, token, headers, jsonapi } = value;
        let mut base_uri = base_uri.parse::<url::Url>()?;
        if base_uri.cannot_be_a_base() {
            return Err(ClientError::InvalidUri(base_uri.to_string()));
        }
        if !base_uri.path().ends_with('/') {
            let path = format!("{}/", base_uri.path());
            base_uri.set_path(&path);
        }
        Ok(Self { base_uri, api_key, token, headers, version: jsonapi.version })
    }
}
