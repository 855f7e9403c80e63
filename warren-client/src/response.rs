use http::{HeaderMap, StatusCode};
use warren::model::document::Document;

/// A successful exchange: the raw status and headers, plus the decoded
/// document when the response had a body
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    document: Option<Document>,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, document: Option<Document>) -> Self {
        Self { status, headers, document }
    }

    pub fn status(&self) -> StatusCode { self.status }

    pub fn headers(&self) -> &HeaderMap { &self.headers }

    pub fn has_document(&self) -> bool { self.document.is_some() }

    pub fn document(&self) -> Option<&Document> { self.document.as_ref() }

    pub fn into_document(self) -> Option<Document> { self.document }
}
