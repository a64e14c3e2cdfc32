//! Stub transport shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::Client;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Answers every request with the same response and records what it was sent.
#[derive(Debug)]
pub(crate) struct StubTransport {
    response: HttpResponse,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub(crate) fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: HttpResponse::new(status, body),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn ok(body: &str) -> Arc<Self> {
        Self::new(200, body)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request sent so far.
    pub(crate) fn last(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

/// A client whose transport is a fresh stub answering `status` / `body`.
pub(crate) fn stub_client(status: u16, body: &str) -> (Client, Arc<StubTransport>) {
    let stub = StubTransport::new(status, body);
    let client = Client::builder("123:TEST")
        .transport(stub.clone())
        .build()
        .unwrap();
    (client, stub)
}

/// Query parameters of a finalized request, in wire order.
pub(crate) fn query_pairs(request: &HttpRequest) -> Vec<(String, String)> {
    let query = request.url.split_once('?').map(|(_, q)| q).unwrap_or("");
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
