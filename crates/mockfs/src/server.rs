// File: src/server.rs
// Purpose: In-process interception layer that dispatches requests to bindings

use mockfs_router::Method;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Result;
use crate::registrar::Binding;

/// Request passed to a handler
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// HTTP method (GET, POST, ...)
    pub method: Method,

    /// Full request URL
    pub url: String,

    /// Parameters captured by the matched route
    pub params: HashMap<String, String>,

    /// Request headers, lowercase names
    pub headers: HashMap<String, String>,

    /// JSON body, if any
    pub body: Option<JsonValue>,
}

impl MockRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: HashMap::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Route parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Header by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Response produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl MockResponse {
    /// 200 response with a JSON body
    pub fn json(value: JsonValue) -> Self {
        Self {
            status: 200,
            headers: HashMap::from([(
                "content-type".to_string(),
                "application/json".to_string(),
            )]),
            body: value.to_string(),
        }
    }

    /// 200 response with a plain text body
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: HashMap::from([(
                "content-type".to_string(),
                "text/plain; charset=utf-8".to_string(),
            )]),
            body: body.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Deserialize the body as JSON
    pub fn json_body<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Dispatches requests to registered bindings
///
/// Bindings are consulted in registration order and the first one whose method
/// and URL match handles the request.
#[derive(Debug, Clone, Default)]
pub struct MockServer {
    bindings: Vec<Binding>,
    case_insensitive: bool,
}

impl MockServer {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            case_insensitive: false,
        }
    }

    /// Compare static path segments ignoring ASCII case
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Append more bindings after the existing ones
    pub fn use_bindings(&mut self, bindings: impl IntoIterator<Item = Binding>) {
        self.bindings.extend(bindings);
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// First binding handling `method` at `url`, with its captured parameters
    pub fn find(&self, method: Method, url: &str) -> Option<(&Binding, HashMap<String, String>)> {
        self.bindings.iter().find_map(|binding| {
            binding
                .matches(method, url, self.case_insensitive)
                .map(|params| (binding, params))
        })
    }

    /// Dispatch a request; `Ok(None)` when no binding matches
    pub async fn fetch(&self, request: MockRequest) -> Result<Option<MockResponse>> {
        let Some((binding, params)) = self.find(request.method, &request.url) else {
            debug!("No mock handler for {} {}", request.method, request.url);
            return Ok(None);
        };

        debug!("{} {} -> {:?}", request.method, request.url, binding.handler);

        let request = MockRequest { params, ..request };
        binding.resolve(request).await.map(Some)
    }
}
