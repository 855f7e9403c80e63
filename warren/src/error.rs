use thiserror::Error;

/// Every way reading a JSON:API document (or building one of its parts) can fail
#[derive(Error, Debug)]
pub enum WarrenError {
    #[error("{0} member is not present")]
    MemberNotPresent(String),
    #[error("{member} member is not {expected}")]
    InvalidMember { member: String, expected: &'static str },
    #[error("{0} member is an empty string")]
    EmptyMember(String),
    #[error("Type \"{0}\" is not in the supplied map")]
    TypeNotMapped(String),
    #[error("No matching resource in collection: {0}")]
    ResourceNotFound(String),
    #[error("No data member or data member is not a valid {0} relationship")]
    InvalidRelationship(&'static str),
    #[error("No resource identifier - relationship is empty")]
    EmptyRelationship,
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Malformed JSON")]
    Json(#[from] serde_json::Error),
    #[error("Invalid JSON:API version: {0}, the valid format is `<major>.<minor>`")]
    InvalidJsonApiVersion(String),
    #[error("Unhandled")]
    Unhandled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl WarrenError {
    pub(crate) fn not_present(member: impl ToString) -> Self {
        WarrenError::MemberNotPresent(member.to_string())
    }

    pub(crate) fn invalid(member: impl ToString, expected: &'static str) -> Self {
        WarrenError::InvalidMember { member: member.to_string(), expected }
    }

    pub(crate) fn invalid_argument(message: impl ToString) -> Self {
        WarrenError::InvalidArgument(message.to_string())
    }
}

from_external_error!(WarrenError; std::str::Utf8Error);
