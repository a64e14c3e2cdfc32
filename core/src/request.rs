//! Per-call request descriptor and the options that may rewrite it.
//!
//! A `Request` is created fresh by an endpoint builder, passed through every
//! `RequestOption` during finalization, and dropped once the call completes.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::params::Params;

/// Everything needed to issue one API call, before finalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    /// Endpoint path appended to the client base address, e.g. `/sendMessage`.
    pub endpoint: String,
    pub query: Params,
    pub form: Params,
    pub headers: Vec<(String, String)>,
    /// Typed JSON body fields, sent only when `form` is non-empty. The body
    /// always follows `form`; these only keep the original JSON types.
    pub json: Option<Map<String, Value>>,
    /// The typed parameter set the builder produced, kept for options that
    /// want to re-shape it (see [`RequestOption::json_body`]).
    pub payload: Option<Value>,
}

impl Request {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// Sets a single query parameter. Composite values are JSON-encoded.
    pub fn set_param<V: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &V) -> Result<&mut Self> {
        self.query.set(key, value)?;
        Ok(self)
    }

    /// Flattens a builder's serialized fields into the query string and keeps
    /// the structured form as the payload. Unset (`null`) fields are dropped
    /// from both.
    pub fn with_params<S: Serialize + ?Sized>(mut self, params: &S) -> Result<Self> {
        let mut payload = serde_json::to_value(params).map_err(Error::Serialization)?;
        if let Value::Object(fields) = &mut payload {
            fields.retain(|_, value| !value.is_null());
        }
        self.query.extend_from(&payload)?;
        self.payload = Some(payload);
        Ok(self)
    }

    /// Stores `params` as the JSON body and mirrors each entry into the form
    /// container. Unset (`null`) fields are dropped from both.
    pub fn set_form_params<S: Serialize + ?Sized>(&mut self, params: &S) -> Result<&mut Self> {
        let value = serde_json::to_value(params).map_err(Error::Serialization)?;
        self.form.extend_from(&value)?;
        if let Value::Object(mut fields) = value {
            fields.retain(|_, value| !value.is_null());
            self.json.get_or_insert_with(Map::new).extend(fields);
        }
        Ok(self)
    }

    pub fn set_form_param<V: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &V) -> Result<&mut Self> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(Error::Serialization)?;
        self.form.set_value(key.clone(), value.clone())?;
        if let Some(fields) = &mut self.json {
            if value.is_null() {
                fields.remove(&key);
            } else {
                fields.insert(key, value);
            }
        }
        Ok(self)
    }

    /// Sets a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }
}

type Apply = dyn Fn(&mut Request) + Send + Sync;

/// A caller-supplied transformation applied to a [`Request`] before finalization.
///
/// Options are stateless and cheap to clone; they run in the order supplied,
/// client-wide defaults first.
#[derive(Clone)]
pub struct RequestOption(Arc<Apply>);

impl RequestOption {
    pub fn new(apply: impl Fn(&mut Request) + Send + Sync + 'static) -> Self {
        Self(Arc::new(apply))
    }

    pub fn apply(&self, request: &mut Request) {
        (self.0)(request)
    }

    /// Adds (or replaces) a header on every request it is applied to.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self::new(move |request| {
            request.set_header(name.clone(), value.clone());
        })
    }

    /// Adds (or replaces) a raw query parameter.
    pub fn query(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        Self::new(move |request| {
            // A plain string always flattens.
            let _ = request.query.set(key.clone(), value.as_str());
        })
    }

    /// Sends the builder's parameter set as a JSON body via POST.
    ///
    /// The query string is left untouched so the request still carries every
    /// parameter in the URL.
    pub fn json_body() -> Self {
        Self::new(|request| {
            let Some(payload) = request.payload.clone() else {
                return;
            };
            if request.set_form_params(&payload).is_ok() {
                request.method = HttpMethod::Post;
            }
        })
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestOption(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Fields {
        chat_id: i64,
        text: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        parse_mode: Option<&'static str>,
    }

    #[test]
    fn with_params_fills_query_and_payload() {
        let req = Request::get("/sendMessage")
            .with_params(&Fields {
                chat_id: 1,
                text: "hi",
                parse_mode: None,
            })
            .unwrap();
        assert_eq!(req.query.keys().collect::<Vec<_>>(), vec!["chat_id", "text"]);
        assert!(req.form.is_empty());
        assert_eq!(req.payload.unwrap()["chat_id"], 1);
    }

    #[test]
    fn set_form_params_keeps_json_and_form_in_sync() {
        let mut req = Request::get("/sendMessage");
        req.set_form_params(&serde_json::json!({"chat_id": 1, "text": "hi"}))
            .unwrap();
        let body = Value::Object(req.json.clone().unwrap());
        assert_eq!(body, serde_json::json!({"chat_id": 1, "text": "hi"}));
        assert_eq!(req.form.get("chat_id"), Some("1"));
        assert_eq!(req.form.get("text"), Some("hi"));
    }

    #[test]
    fn later_form_params_reach_the_json_fields() {
        let mut req = Request::get("/sendMessage");
        req.set_form_params(&serde_json::json!({"chat_id": 7, "parse_mode": null}))
            .unwrap();
        req.set_form_param("text", "hi").unwrap();
        let body = Value::Object(req.json.clone().unwrap());
        assert_eq!(body, serde_json::json!({"chat_id": 7, "text": "hi"}));
        assert!(!req.form.contains("parse_mode"));
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut req = Request::get("/getMe");
        req.set_header("X-Trace", "a");
        req.set_header("x-trace", "b");
        assert_eq!(req.headers, vec![("x-trace".to_string(), "b".to_string())]);
    }

    #[test]
    fn options_apply_in_order() {
        let mut req = Request::get("/getMe");
        let first = RequestOption::query("offset", "1");
        let second = RequestOption::query("offset", "2");
        first.apply(&mut req);
        second.apply(&mut req);
        assert_eq!(req.query.get("offset"), Some("2"));
    }

    #[test]
    fn json_body_mirrors_payload_and_switches_to_post() {
        let mut req = Request::get("/sendMessage")
            .with_params(&Fields {
                chat_id: 5,
                text: "hey",
                parse_mode: Some("HTML"),
            })
            .unwrap();
        RequestOption::json_body().apply(&mut req);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.form.len(), 3);
        assert_eq!(req.json.as_ref().unwrap()["parse_mode"], "HTML");
        assert_eq!(req.query.len(), 3);
    }

    #[test]
    fn json_body_without_payload_is_a_no_op() {
        let mut req = Request::get("/getMe");
        RequestOption::json_body().apply(&mut req);
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.json.is_none());
    }
}
