use crate::body::{request_has_body, response_has_body};
use crate::error::{ClientError, ClientResult, RequestFailure};
use crate::response::Response;
use crate::settings::ClientSettings;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use http::header::{HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, Method};
use serde_json::Value;
use warren::entity::{DocumentSerializer, Entity, Serializer};
use warren::model::document::Document;
use warren::model::error::{Error, ErrorCollection};
use warren::model::object::ObjectView;
use warren::model::version::JsonApiVersion;
use warren::query::{EncodingParameters, FieldsQuery};
use warren::{WarrenResult, JSON_API_HEADER};

pub const API_KEY_HEADER: &str = "X-Api-Key";

/// CRUD calls against a JSON:API server
///
/// Endpoints are resolved against `base_uri` with [`url::Url::join`], so a
/// relative endpoint (`"articles/1"`) keeps the base path while an absolute
/// one (`"/articles/1"`) replaces it.
pub struct JsonApiClient<T, S = DocumentSerializer> {
    base_uri: url::Url,
    headers: HeaderMap,
    version: JsonApiVersion,
    transport: T,
    serializer: S,
}

impl<T: Transport> JsonApiClient<T> {
    pub fn new(base_uri: url::Url, transport: T) -> Self {
        Self::with_serializer(base_uri, transport, DocumentSerializer)
    }

    /// A client with the base URI, credentials and extra headers of `settings`
    pub fn from_settings(settings: &ClientSettings, transport: T) -> ClientResult<Self> {
        let mut client = Self::new(settings.base_uri.clone(), transport);
        client.version = settings.version.clone();
        for (name, value) in &settings.headers {
            client.add_header(name, value)?;
        }
        if let Some(key) = &settings.api_key {
            client.add_api_key(key)?;
        }
        if let Some(token) = &settings.token {
            client.add_authorization(token)?;
        }
        Ok(client)
    }
}

impl<T: Transport, S: Serializer> JsonApiClient<T, S> {
    pub fn with_serializer(base_uri: url::Url, transport: T, serializer: S) -> Self {
        Self { base_uri, headers: HeaderMap::new(), version: Default::default(), transport, serializer }
    }

    pub fn base_uri(&self) -> &url::Url { &self.base_uri }

    /// Headers sent with every request, on top of the JSON:API ones
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    pub fn version(&self) -> &JsonApiVersion { &self.version }

    pub async fn index(
        &self, endpoint: &str, parameters: Option<&EncodingParameters>,
    ) -> ClientResult<Response> {
        self.request(Method::GET, endpoint, parameters, None).await
    }

    pub async fn read(
        &self, endpoint: &str, parameters: Option<&EncodingParameters>,
    ) -> ClientResult<Response> {
        self.request(Method::GET, endpoint, parameters, None).await
    }

    pub async fn create(
        &self, endpoint: &str, record: &dyn Entity, parameters: Option<&EncodingParameters>,
    ) -> ClientResult<Response> {
        let body = self.serialize_record(record, None)?;
        self.request(Method::POST, endpoint, parameters, Some(body)).await
    }

    /// `fields` limits the attributes and relationships written for the record
    pub async fn update(
        &self, endpoint: &str, record: &dyn Entity, fields: Option<&[&str]>,
        parameters: Option<&EncodingParameters>,
    ) -> ClientResult<Response> {
        let body = self.serialize_record(record, fields)?;
        self.request(Method::PATCH, endpoint, parameters, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> ClientResult<Response> {
        self.request(Method::DELETE, endpoint, None, None).await
    }

    pub fn add_api_key(&mut self, key: &str) -> ClientResult<()> { self.add_header(API_KEY_HEADER, key) }

    pub fn add_authorization(&mut self, token: &str) -> ClientResult<()> {
        self.add_header(AUTHORIZATION.as_str(), &format!("Bearer {}", token))
    }

    pub fn remove_authorization(&mut self) { self.headers.remove(AUTHORIZATION); }

    /// Replaces any earlier value of the header
    pub fn add_header(&mut self, name: &str, value: &str) -> ClientResult<()> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    fn serialize_record(&self, record: &dyn Entity, fields: Option<&[&str]>) -> ClientResult<Vec<u8>> {
        let fields: Option<FieldsQuery> = fields.map(|fields| {
            let mut query = FieldsQuery::new();
            query.insert(record.ty(), fields.iter().map(ToString::to_string).collect());
            query
        });
        let data = self.serializer.serialize_data(record, fields.as_ref())?;
        Ok(serde_json::to_vec(&data)?)
    }

    fn build_request(
        &self, method: Method, endpoint: &str, parameters: Option<&EncodingParameters>, body: Option<Vec<u8>>,
    ) -> ClientResult<HttpRequest> {
        let mut uri = self.base_uri.join(endpoint)?;
        if let Some(parameters) = parameters.filter(|parameters| !parameters.is_empty()) {
            uri.set_query(Some(&parameters.to_query_string()));
        }

        let mut headers = self.headers.clone();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_HEADER));
        let body = match body {
            Some(body) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API_HEADER));
                headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len() as u64));
                body
            },
            None => vec![],
        };

        let mut request = http::Request::new(body);
        *request.method_mut() = method;
        *request.uri_mut() =
            uri.as_str().parse::<http::Uri>().map_err(|err| ClientError::InvalidUri(err.to_string()))?;
        *request.headers_mut() = headers;
        Ok(request)
    }

    async fn request(
        &self, method: Method, endpoint: &str, parameters: Option<&EncodingParameters>, body: Option<Vec<u8>>,
    ) -> ClientResult<Response> {
        let request = self.build_request(method, endpoint, parameters, body)?;
        debug!("{} {}", request.method(), request.uri());

        let method = request.method().clone();
        let request_headers = request.headers().clone();
        let request_body = request.body().clone();

        match self.transport.send(request).await {
            Ok(response) if response.status().is_success() => self.read_response(&method, response),
            Ok(response) => {
                debug!("{} answered with {}", method, response.status());
                Err(failure_from_response(&method, &response).into())
            },
            Err(err) => {
                debug!("{} got no response: {}", method, err);
                Err(failure_from_request(&request_headers, &request_body, err).into())
            },
        }
    }

    fn read_response(&self, method: &Method, response: HttpResponse) -> ClientResult<Response> {
        let (parts, body) = response.into_parts();
        let document = if response_has_body(method, parts.status, &parts.headers, &body) {
            let document = Document::from_slice(&body)?;
            self.check_version(&document);
            Some(document)
        } else {
            None
        };
        Ok(Response::new(parts.status, parts.headers, document))
    }

    fn check_version(&self, document: &Document) {
        match document.jsonapi() {
            Ok(Some(info)) => {
                if let Some(version) = info.version.filter(|version| version > &self.version) {
                    warn!("server speaks JSON:API {}, client is configured for {}", version, self.version);
                }
            },
            Ok(None) => {},
            Err(err) => warn!("ignoring unreadable jsonapi member: {}", err),
        }
    }
}

fn failure_from_response(method: &Method, response: &HttpResponse) -> RequestFailure {
    let has_body = response_has_body(method, response.status(), response.headers(), response.body());
    match read_errors(has_body, response.body()) {
        Ok(errors) => RequestFailure { errors, status: response.status().as_u16(), cause: None },
        Err(err) => {
            warn!("could not read errors of a {} response: {}", response.status(), err);
            RequestFailure { errors: ErrorCollection::new(), status: 0, cause: None }
        },
    }
}

fn failure_from_request(headers: &HeaderMap, body: &[u8], cause: TransportError) -> RequestFailure {
    match read_errors(request_has_body(headers, body), body) {
        Ok(errors) => RequestFailure { errors, status: 0, cause: Some(cause) },
        Err(err) => {
            warn!("could not read errors from the request body: {}", err);
            RequestFailure { errors: ErrorCollection::new(), status: 0, cause: Some(cause) }
        },
    }
}

/// The `errors` member of the body, or a single error made from the whole body
/// when that member is absent or unusable
fn read_errors(has_body: bool, body: &[u8]) -> WarrenResult<ErrorCollection> {
    if !has_body {
        return Ok(ErrorCollection::new());
    }
    let document = Document::from_slice(body)?;
    match document.errors() {
        Ok(Some(errors)) => Ok(errors),
        Ok(None) | Err(_) => {
            let error = Error::create(&Value::from(document.object().clone()))?;
            Ok(vec![error].into())
        },
    }
}
