use async_trait::async_trait;
use http::header::CONTENT_LENGTH;
use http::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use warren_client::transport::{HttpRequest, HttpResponse, Transport, TransportError};

pub fn read_json_file(filename: &str) -> String {
    let path = format!("{}/tests/{}", env!("CARGO_MANIFEST_DIR"), filename);
    std::fs::read_to_string(&path).unwrap()
}

/// Answers with queued responses and keeps every request it was given
#[derive(Clone, Default)]
pub struct MockTransport {
    pub requests: Arc<Mutex<Vec<HttpRequest>>>,
    replies: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
}

impl MockTransport {
    pub fn new() -> Self { Default::default() }

    pub fn reply(&self, status: StatusCode, body: &str) -> &Self {
        let mut builder = http::Response::builder().status(status);
        if !body.is_empty() {
            builder = builder.header(CONTENT_LENGTH, body.len());
        }
        self.replies.lock().unwrap().push_back(Ok(builder.body(body.as_bytes().to_vec()).unwrap()));
        self
    }

    pub fn reply_raw(&self, response: HttpResponse) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn last_request(&self) -> HttpRequest {
        let requests = self.requests.lock().unwrap();
        let last = requests.last().unwrap();
        let mut request = http::Request::new(last.body().clone());
        *request.method_mut() = last.method().clone();
        *request.uri_mut() = last.uri().clone();
        *request.headers_mut() = last.headers().clone();
        request
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no reply queued".into())))
    }
}
