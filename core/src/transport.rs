//! The HTTP round trip, behind a trait so clients can inject their own.
//!
//! # Design
//! A `Transport` takes a finalized `HttpRequest` and returns the full
//! `HttpResponse`, status and body included, for every status code. It never
//! interprets the status: classification belongs to the client.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes exactly one HTTP round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Settings for the default reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Route every request through this proxy.
    pub proxy_url: Option<String>,
    /// Skip TLS certificate verification. Only for trusted intermediaries.
    pub danger_accept_invalid_certs: bool,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

/// Default transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(options: &TransportOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(options.danger_accept_invalid_certs);
        if let Some(proxy_url) = &options.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::InvalidRequest(format!("invalid proxy url {proxy_url}: {e}")))?;
            builder = builder.proxy(proxy);
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::transport)?;
        Ok(Self { client })
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Error::transport)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(Error::transport)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_proxy_and_relaxed_tls() {
        let options = TransportOptions {
            proxy_url: Some("http://127.0.0.1:3128".to_string()),
            danger_accept_invalid_certs: true,
            user_agent: Some("botapi-rs".to_string()),
            timeout: Some(Duration::from_secs(5)),
        };
        assert!(ReqwestTransport::new(&options).is_ok());
    }

    #[test]
    fn rejects_malformed_proxy_url() {
        let options = TransportOptions {
            proxy_url: Some("not a url".to_string()),
            ..TransportOptions::default()
        };
        let err = ReqwestTransport::new(&options).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
