use crate::transport::TransportError;
use thiserror::Error;
use warren::error::WarrenError;
use warren::model::error::ErrorCollection;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// A request the server rejected, or that never got an answer
///
/// `status` is `0` when there was no response, and `errors` is empty when the
/// response could not be read.
#[derive(Error, Debug)]
#[error("JSON:API request failed with status {status}")]
pub struct RequestFailure {
    pub errors: ErrorCollection,
    pub status: u16,
    #[source]
    pub cause: Option<TransportError>,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    RequestFailed(#[from] RequestFailure),
    #[error("Invalid JSON:API message")]
    Model(#[from] WarrenError),
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
    #[error("Invalid settings")]
    InvalidSettings(#[source] config::ConfigError),
    #[error("Unhandled")]
    Unhandled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ClientError {
    pub fn failure(&self) -> Option<&RequestFailure> {
        match self {
            ClientError::RequestFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self { ClientError::InvalidUri(err.to_string()) }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self { ClientError::InvalidSettings(err) }
}

warren::from_external_error!(
    ClientError;
    http::Error,
    http::header::InvalidHeaderName,
    http::header::InvalidHeaderValue,
    serde_json::Error
);
