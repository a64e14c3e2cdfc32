//! Verify the finalizer and the response decoder against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected finalized request or the
//! expected decode outcome. Bodies are compared as parsed JSON, not raw
//! strings, so field ordering does not matter.

use std::sync::Arc;

use async_trait::async_trait;
use botapi_core::types::{Message, User};
use botapi_core::{
    Client, Error, HttpMethod, HttpRequest, HttpResponse, Request, Result, Transport,
};
use serde_json::Value;

/// Never called: these tests only use the sans-IO half of the client.
struct Unreachable;

#[async_trait]
impl Transport for Unreachable {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse> {
        panic!("test vectors must not perform I/O");
    }
}

fn client() -> Client {
    Client::builder("123:TEST")
        .transport(Arc::new(Unreachable))
        .build()
        .unwrap()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Finalize
// ---------------------------------------------------------------------------

#[test]
fn finalize_test_vectors() {
    let raw = include_str!("../../test-vectors/finalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    let c = client();
    assert_eq!(c.base_url(), base_url);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];

        let mut request = Request::get(case["endpoint"].as_str().unwrap());
        for (key, value) in case["query"].as_object().unwrap() {
            request.set_param(key.clone(), value).unwrap();
        }
        if let Some(form) = case.get("form") {
            request.set_form_params(form).unwrap();
        }

        let req = c.finalize(request, &[]);
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.url,
            format!("{base_url}{}", expected["path"].as_str().unwrap()),
            "{name}: url"
        );

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match &expected["body"] {
            Value::Null => assert!(req.body.is_none(), "{name}: body should be empty"),
            body => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, body, "{name}: body");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Decodes with the type named by the vector and re-renders the result as JSON
/// in the shape the vector expects.
fn decode(c: &Client, kind: &str, response: HttpResponse) -> std::result::Result<Vec<Value>, Error> {
    match kind {
        "user" => Ok(c
            .parse_response::<User>(response)?
            .into_iter()
            .map(|user| serde_json::to_value(user).unwrap())
            .collect()),
        "bool" => Ok(c
            .parse_response::<bool>(response)?
            .into_iter()
            .map(Value::Bool)
            .collect()),
        "message" => Ok(c
            .parse_response::<Message>(response)?
            .into_iter()
            .map(|m| {
                serde_json::json!({
                    "message_id": m.message_id,
                    "chat_id": m.chat.id,
                    "text": m.text,
                })
            })
            .collect()),
        other => panic!("unknown kind: {other}"),
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse::new(
            case["response"]["status"].as_u64().unwrap() as u16,
            case["response"]["body"].as_str().unwrap(),
        );
        let expected = &case["expected"];
        let outcome = decode(&c, case["kind"].as_str().unwrap(), response);

        if let Some(result) = expected.get("result") {
            let decoded = outcome.unwrap_or_else(|e| panic!("{name}: unexpected error {e}"));
            assert_eq!(&Value::Array(decoded), result, "{name}: result");
        } else if let Some(api) = expected.get("api_error") {
            let err = outcome.expect_err(name);
            let got = err
                .api_error()
                .unwrap_or_else(|| panic!("{name}: expected api error, got {err:?}"));
            assert_eq!(got.status as u64, api["status"].as_u64().unwrap(), "{name}: status");
            assert_eq!(got.error_code, api["error_code"].as_i64().unwrap(), "{name}: error_code");
            assert_eq!(got.description, api["description"].as_str().unwrap(), "{name}: description");
            assert_eq!(got.retry_after(), api["retry_after"].as_i64(), "{name}: retry_after");
        } else {
            let err = outcome.expect_err(name);
            assert!(matches!(err, Error::Deserialization(_)), "{name}: got {err:?}");
        }
    }
}
