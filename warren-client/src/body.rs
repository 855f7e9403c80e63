use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use http::{HeaderMap, Method, StatusCode};

/// A request carries a body iff it is chunked or announces a positive length
pub fn request_has_body(headers: &HeaderMap, bytes: &[u8]) -> bool { announces_body(headers, bytes) }

/// `HEAD` answers, 1xx, `204 No Content` and `304 Not Modified` never carry a
/// body, otherwise the headers decide
pub fn response_has_body(method: &Method, status: StatusCode, headers: &HeaderMap, bytes: &[u8]) -> bool {
    if method == Method::HEAD {
        return false;
    }
    if status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED {
        return false;
    }
    announces_body(headers, bytes)
}

fn announces_body(headers: &HeaderMap, bytes: &[u8]) -> bool {
    if headers.contains_key(TRANSFER_ENCODING) {
        return true;
    }
    match headers.get(CONTENT_LENGTH) {
        Some(length) => length
            .to_str()
            .ok()
            .and_then(|length| length.trim().parse::<u64>().ok())
            .map_or(false, |length| length > 0),
        // in-memory messages often come without framing headers
        None => !bytes.is_empty(),
    }
}
