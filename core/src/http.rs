//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe a finalized HTTP request and its response as plain
//! data. The pipeline produces an `HttpRequest` from a request descriptor,
//! hands it to a `Transport`, and interprets the `HttpResponse` it gets back.
//! Keeping both sides as data lets the whole pipeline run against a stub
//! transport in tests.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A finalized HTTP request described as plain data.
///
/// `url` already carries the encoded query string. `body` is `None` when the
/// request has no form parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data, with the body read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Statuses at or above 400 are failures regardless of the body.
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }
}
