//! The shared request/response pipeline every endpoint funnels through.
//!
//! # Design
//! `Client` is a cheap handle over immutable configuration: token, base
//! address, injected transport, clock-skew offset and default request
//! options. The only mutable state is the debug flag, an atomic.
//!
//! One call is split the same way as the rest of the crate:
//! - [`Client::finalize`] turns a [`Request`] descriptor into a plain
//!   [`HttpRequest`] (options applied, URL and body composed).
//! - The [`Transport`] performs the round trip, raced against the caller's
//!   [`Context`].
//! - [`Client::parse_response`] classifies the status and decodes the
//!   envelope into a typed list.
//!
//! The first and last steps never touch the network, so the whole pipeline
//! can be driven by hand or against a stub transport.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_USER_AGENT};
use crate::context::Context;
use crate::error::{ApiError, Error, ResponseParameters, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::{self, Params};
use crate::request::{Request, RequestOption};
use crate::transport::{ReqwestTransport, Transport, TransportOptions};

struct ClientInner {
    token: String,
    api_url: String,
    /// `{api_url}/bot{token}`, without a trailing slash.
    base_url: String,
    transport: Arc<dyn Transport>,
    debug: AtomicBool,
    time_offset: i64,
    default_options: Vec<RequestOption>,
}

/// Handle to the Bot API. Clones share configuration and transport.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.inner.api_url)
            .field("debug", &self.debug_enabled())
            .field("time_offset", &self.inner.time_offset)
            .finish_non_exhaustive()
    }
}

/// Configures a [`Client`] before it is shared.
pub struct ClientBuilder {
    token: String,
    api_url: String,
    transport: Option<Arc<dyn Transport>>,
    transport_options: TransportOptions,
    debug: bool,
    time_offset: i64,
    default_options: Vec<RequestOption>,
}

impl ClientBuilder {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            transport: None,
            transport_options: TransportOptions {
                user_agent: Some(DEFAULT_USER_AGENT.to_string()),
                ..TransportOptions::default()
            },
            debug: false,
            time_offset: 0,
            default_options: Vec::new(),
        }
    }

    /// Platform address, e.g. a self-hosted Bot API server.
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.transport_options.proxy_url = Some(proxy_url.into());
        self
    }

    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.transport_options.danger_accept_invalid_certs = accept;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport_options.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport_options.timeout = Some(timeout);
        self
    }

    /// Replaces the default reqwest transport. Proxy, TLS, user agent and
    /// timeout settings are then the transport's own business.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Clock skew against the platform, in milliseconds.
    pub fn time_offset(mut self, offset_ms: i64) -> Self {
        self.time_offset = offset_ms;
        self
    }

    /// Replaces every transport setting at once.
    pub fn transport_options(mut self, options: TransportOptions) -> Self {
        self.transport_options = options;
        self
    }

    /// Applied to every request before the per-call options.
    pub fn default_option(mut self, option: RequestOption) -> Self {
        self.default_options.push(option);
        self
    }

    pub fn build(self) -> Result<Client> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.transport_options)?),
        };
        let api_url = self.api_url.trim_end_matches('/').to_string();
        let base_url = format!("{api_url}/bot{}", self.token);
        Ok(Client {
            inner: Arc::new(ClientInner {
                token: self.token,
                api_url,
                base_url,
                transport,
                debug: AtomicBool::new(self.debug),
                time_offset: self.time_offset,
                default_options: self.default_options,
            }),
        })
    }
}

impl Client {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(token).build()
    }

    /// Routes every call through `proxy_url`, optionally without verifying TLS
    /// certificates.
    pub fn with_proxy(
        token: impl Into<String>,
        proxy_url: impl Into<String>,
        danger_accept_invalid_certs: bool,
    ) -> Result<Self> {
        ClientBuilder::new(token)
            .proxy(proxy_url)
            .danger_accept_invalid_certs(danger_accept_invalid_certs)
            .build()
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        ClientBuilder::new(config.token.clone())
            .api_url(config.api_url.clone())
            .transport_options(config.transport_options())
            .debug(config.debug)
            .time_offset(config.time_offset)
            .build()
    }

    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    pub fn set_debug(&self, debug: bool) {
        self.inner.debug.store(debug, Ordering::Relaxed);
    }

    pub fn debug_enabled(&self) -> bool {
        self.inner.debug.load(Ordering::Relaxed)
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Download address for a [`File`](crate::types::File) path returned by `getFile`.
    pub fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.inner.api_url,
            self.inner.token,
            file_path.trim_start_matches('/')
        )
    }

    /// Local clock corrected by the configured offset.
    pub fn server_time(&self) -> SystemTime {
        let offset = Duration::from_millis(self.inner.time_offset.unsigned_abs());
        let now = SystemTime::now();
        if self.inner.time_offset >= 0 {
            now + offset
        } else {
            now.checked_sub(offset).unwrap_or(UNIX_EPOCH)
        }
    }

    /// Applies options and composes the wire request. Never fails and never
    /// checks required parameters; the platform does that.
    pub fn finalize(&self, mut request: Request, options: &[RequestOption]) -> HttpRequest {
        for option in self.inner.default_options.iter().chain(options) {
            option.apply(&mut request);
        }

        let mut url = format!("{}{}", self.inner.base_url, request.endpoint);
        if !request.query.is_empty() {
            url.push('?');
            url.push_str(&request.query.encode());
        }

        let body = if request.form.is_empty() {
            None
        } else {
            request.set_header("Content-Type", "application/json");
            Some(render_body(&request.form, request.json.take().unwrap_or_default()))
        };

        let finalized = HttpRequest {
            method: request.method,
            url,
            headers: request.headers,
            body,
        };
        if self.debug_enabled() {
            tracing::debug!(
                method = finalized.method.as_str(),
                url = %self.redact(&finalized.url),
                body = finalized.body.as_deref().unwrap_or(""),
                "finalized request"
            );
        }
        finalized
    }

    /// Executes one round trip and returns the response if its status is below 400.
    pub async fn call_api(
        &self,
        ctx: &Context,
        request: Request,
        options: &[RequestOption],
    ) -> Result<HttpResponse> {
        let request = self.finalize(request, options);
        if self.debug_enabled() {
            tracing::debug!(
                method = request.method.as_str(),
                url = %self.redact(&request.url),
                "sending request"
            );
        }
        let response = ctx.run(self.inner.transport.execute(request)).await??;
        if self.debug_enabled() {
            tracing::debug!(status = response.status, body = %response.body, "received response");
        }
        self.check_status(response)
    }

    /// Full pipeline: finalize, execute, classify, decode.
    pub async fn call<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: Request,
        options: &[RequestOption],
    ) -> Result<Vec<T>> {
        let response = self.call_api(ctx, request, options).await?;
        decode(&response)
    }

    /// Classifies and decodes a response obtained outside [`Client::call`].
    pub fn parse_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Vec<T>> {
        let response = self.check_status(response)?;
        decode(&response)
    }

    /// Maps failure statuses to [`Error::Api`]. A body that is not an error
    /// envelope still yields an `ApiError`, with empty fields.
    fn check_status(&self, response: HttpResponse) -> Result<HttpResponse> {
        if !response.is_failure() {
            return Ok(response);
        }
        let mut err = match serde_json::from_str::<ApiError>(&response.body) {
            Ok(err) => err,
            Err(decode_err) => {
                if self.debug_enabled() {
                    tracing::debug!(
                        status = response.status,
                        error = %decode_err,
                        "failed to decode error envelope"
                    );
                }
                ApiError::default()
            }
        };
        err.status = response.status;
        Err(Error::Api(err))
    }

    /// Masks the token in the `/bot{token}` segment only.
    fn redact(&self, url: &str) -> String {
        match url.strip_prefix(&self.inner.base_url) {
            Some(rest) => format!("{}/bot<redacted>{rest}", self.inner.api_url),
            None => url.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    description: String,
    parameters: Option<ResponseParameters>,
}

/// Renders `form` as a JSON object. A field keeps its typed value from `typed`
/// while both still agree; anything else is sent as the form's text.
fn render_body(form: &Params, typed: Map<String, Value>) -> String {
    let fields: Map<String, Value> = form
        .iter()
        .map(|(key, text)| {
            let value = match typed.get(key) {
                Some(value) if params::flattened(value).as_deref() == Some(text) => value.clone(),
                _ => Value::String(text.to_string()),
            };
            (key.to_string(), value)
        })
        .collect();
    Value::Object(fields).to_string()
}

/// Normalizes the body to a list of envelopes and unwraps each one.
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<Vec<T>> {
    let body: Value = serde_json::from_str(&response.body)
        .map_err(|e| Error::Deserialization(e.to_string()))?;
    let envelopes = match body {
        Value::Array(items) => items,
        other => vec![other],
    };
    envelopes
        .into_iter()
        .map(|item| {
            let envelope: Envelope<T> =
                serde_json::from_value(item).map_err(|e| Error::Deserialization(e.to_string()))?;
            if !envelope.ok {
                return Err(Error::Api(ApiError {
                    ok: false,
                    error_code: envelope.error_code,
                    description: envelope.description,
                    parameters: envelope.parameters,
                    status: response.status,
                }));
            }
            envelope
                .result
                .ok_or_else(|| Error::Deserialization("envelope has no result".to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::StubTransport;
    use crate::types::User;

    fn client() -> Client {
        Client::builder("123:secret")
            .api_url("http://localhost:8081/")
            .transport(StubTransport::ok(r#"{"ok":true,"result":true}"#))
            .build()
            .unwrap()
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        assert_eq!(client().base_url(), "http://localhost:8081/bot123:secret");
    }

    #[test]
    fn finalize_without_form_has_no_body() {
        let mut request = Request::get("/sendMessage");
        request.set_param("chat_id", &7i64).unwrap();
        request.set_param("text", "hi there").unwrap();
        let req = client().finalize(request, &[]);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:8081/bot123:secret/sendMessage?chat_id=7&text=hi+there"
        );
        assert!(req.body.is_none());
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn finalize_without_params_has_bare_url() {
        let req = client().finalize(Request::get("/getMe"), &[]);
        assert_eq!(req.url, "http://localhost:8081/bot123:secret/getMe");
        assert!(req.body.is_none());
    }

    #[test]
    fn finalize_with_form_sends_json() {
        let mut request = Request::get("/sendMessage");
        request
            .set_form_params(&serde_json::json!({"chat_id": 7, "text": "hi"}))
            .unwrap();
        let req = client().finalize(request, &[]);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"chat_id": 7, "text": "hi"}));
    }

    #[test]
    fn finalize_body_follows_later_form_params() {
        let mut request = Request::get("/sendMessage");
        request
            .set_form_params(&serde_json::json!({"chat_id": 7, "reply_markup": null}))
            .unwrap();
        request.set_form_param("text", "hi").unwrap();
        let req = client().finalize(
            request,
            &[RequestOption::new(|request| {
                let _ = request.form.set("chat_id", "@news");
            })],
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"chat_id": "@news", "text": "hi"}));
    }

    #[test]
    fn finalize_with_loose_form_params_renders_them() {
        let mut request = Request::get("/deleteWebhook");
        request.set_form_param("drop_pending_updates", &true).unwrap();
        let req = client().finalize(request, &[]);
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"drop_pending_updates": "true"}));
    }

    #[test]
    fn default_options_run_before_call_options() {
        let client = Client::builder("t")
            .transport(StubTransport::ok("{}"))
            .default_option(RequestOption::header("X-Source", "default"))
            .default_option(RequestOption::query("offset", "1"))
            .build()
            .unwrap();
        let req = client.finalize(
            Request::get("/getUpdates"),
            &[RequestOption::header("x-source", "call")],
        );
        assert_eq!(req.header("X-Source"), Some("call"));
        assert!(req.url.ends_with("/getUpdates?offset=1"));
    }

    #[test]
    fn parse_response_wraps_single_object() {
        let users: Vec<User> = client()
            .parse_response(HttpResponse::new(
                200,
                r#"{"ok":true,"result":{"id":42,"is_bot":true,"first_name":"Bot"}}"#,
            ))
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 42);
    }

    #[test]
    fn parse_response_accepts_list_of_envelopes() {
        let flags: Vec<bool> = client()
            .parse_response(HttpResponse::new(
                200,
                r#"[{"ok":true,"result":true},{"ok":true,"result":false}]"#,
            ))
            .unwrap();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn failure_status_yields_api_error() {
        let err = client()
            .parse_response::<bool>(HttpResponse::new(
                429,
                r#"{"ok":false,"error_code":429,"description":"Too Many Requests","parameters":{"retry_after":3}}"#,
            ))
            .unwrap_err();
        let api = err.api_error().unwrap();
        assert_eq!(api.status, 429);
        assert_eq!(api.error_code, 429);
        assert_eq!(api.description, "Too Many Requests");
        assert_eq!(api.retry_after(), Some(3));
    }

    #[test]
    fn malformed_error_body_still_yields_api_error() {
        let err = client()
            .parse_response::<bool>(HttpResponse::new(502, "<html>Bad Gateway</html>"))
            .unwrap_err();
        let api = err.api_error().unwrap();
        assert_eq!(api.status, 502);
        assert_eq!(api.error_code, 0);
        assert!(api.description.is_empty());
    }

    #[test]
    fn bad_json_on_success_is_a_decode_error() {
        let err = client()
            .parse_response::<User>(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }

    #[test]
    fn ok_false_on_success_status_is_api_error() {
        let err = client()
            .parse_response::<bool>(HttpResponse::new(
                200,
                r#"{"ok":false,"error_code":400,"description":"Bad Request"}"#,
            ))
            .unwrap_err();
        assert_eq!(err.api_error().map(|e| e.error_code), Some(400));
    }

    #[test]
    fn ok_without_result_is_a_decode_error() {
        let err = client()
            .parse_response::<User>(HttpResponse::new(200, r#"{"ok":true}"#))
            .unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }

    #[test]
    fn file_url_uses_file_base() {
        assert_eq!(
            client().file_url("photos/file_1.jpg"),
            "http://localhost:8081/file/bot123:secret/photos/file_1.jpg"
        );
    }

    #[test]
    fn server_time_applies_offset() {
        let client = Client::builder("t")
            .transport(StubTransport::ok("{}"))
            .time_offset(60_000)
            .build()
            .unwrap();
        let skew = client
            .server_time()
            .duration_since(SystemTime::now())
            .unwrap();
        assert!(skew > Duration::from_secs(59));
    }

    #[test]
    fn debug_flag_toggles() {
        let client = client();
        assert!(!client.debug_enabled());
        client.clone().set_debug(true);
        assert!(client.debug_enabled());
    }

    #[test]
    fn redact_hides_token() {
        assert_eq!(
            client().redact("http://localhost:8081/bot123:secret/getMe"),
            "http://localhost:8081/bot<redacted>/getMe"
        );
    }

    #[test]
    fn redact_leaves_the_rest_of_the_url_alone() {
        let client = Client::builder("t")
            .transport(StubTransport::ok("{}"))
            .build()
            .unwrap();
        assert_eq!(
            client.redact("https://api.telegram.org/bott/getMe?text=test"),
            "https://api.telegram.org/bot<redacted>/getMe?text=test"
        );
    }

    #[test]
    fn from_config_applies_transport_settings() {
        let mut config = ClientConfig::new("9:cfg");
        config.api_url = "http://127.0.0.1:1/".to_string();
        config.proxy_url = Some("http://proxy.local:3128".to_string());
        config.timeout_secs = Some(3);
        config.debug = true;
        let client = Client::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1/bot9:cfg");
        assert!(client.debug_enabled());
    }

    #[tokio::test]
    async fn call_goes_through_transport() {
        let stub = StubTransport::ok(r#"{"ok":true,"result":{"id":42,"is_bot":true,"first_name":"Bot"}}"#);
        let client = Client::builder("t").transport(stub.clone()).build().unwrap();
        let users: Vec<User> = client
            .call(&Context::background(), Request::get("/getMe"), &[])
            .await
            .unwrap();
        assert_eq!(users[0].first_name, "Bot");
        let sent = stub.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://api.telegram.org/bott/getMe");
    }

    #[tokio::test]
    async fn cancelled_context_skips_transport() {
        let stub = StubTransport::ok(r#"{"ok":true,"result":true}"#);
        let client = Client::builder("t").transport(stub.clone()).build().unwrap();
        let ctx = Context::background();
        ctx.cancel();
        let err = client
            .call::<bool>(&ctx, Request::get("/logOut"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(stub.requests().is_empty());
    }
}
