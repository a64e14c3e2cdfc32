//! In-memory stand-in for the Bot API, used by the client's integration tests.
//!
//! Every method lives at `/bot{token}/{method}` and accepts its parameters as a
//! query string, a JSON body, or both (body first, query on top). Replies use
//! the platform's envelope: `{"ok":true,"result":...}` on success and
//! `{"ok":false,"error_code":..,"description":..}` with a matching status on
//! failure.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Token accepted by [`app`].
pub const TEST_TOKEN: &str = "123:TEST";

/// Seconds a flood-controlled caller is told to wait.
pub const RETRY_AFTER: i64 = 5;

const BOT_ID: i64 = 123;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredMessage {
    pub message_id: i64,
    pub chat_id: String,
    pub text: String,
    pub date: i64,
    pub edit_date: Option<i64>,
    pub reply_markup: Option<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Webhook {
    pub url: String,
    pub max_connections: Option<i64>,
    pub allowed_updates: Option<Vec<String>>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Default)]
pub struct BotState {
    token: String,
    last_message_id: i64,
    messages: HashMap<(String, i64), StoredMessage>,
    webhook: Option<Webhook>,
    answered_callbacks: Vec<String>,
}

pub type Db = Arc<RwLock<BotState>>;

/// Router for a bot authenticated by [`TEST_TOKEN`].
pub fn app() -> Router {
    app_with_token(TEST_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let db: Db = Arc::new(RwLock::new(BotState {
        token: token.to_string(),
        ..BotState::default()
    }));
    Router::new()
        .route("/{bot_token}/{method}", get(dispatch).post(dispatch))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// A failed call, rendered as an error envelope.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    description: String,
    retry_after: Option<i64>,
}

impl Failure {
    fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
            retry_after: None,
        }
    }

    fn bad_request(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, format!("Bad Request: {detail}"))
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut body = json!({
            "ok": false,
            "error_code": self.status.as_u16(),
            "description": self.description,
        });
        if let Some(retry_after) = self.retry_after {
            body["parameters"] = json!({ "retry_after": retry_after });
        }
        (self.status, Json(body)).into_response()
    }
}

type Reply = Result<Json<Value>, Failure>;

fn ok(result: Value) -> Reply {
    Ok(Json(json!({ "ok": true, "result": result })))
}

/// Call parameters, all as strings, the way they arrive in a query string.
struct Params(HashMap<String, String>);

impl Params {
    fn merge(query: HashMap<String, String>, body: &Bytes) -> Self {
        let mut values = HashMap::new();
        if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) {
            for (key, value) in fields {
                let text = match value {
                    Value::String(text) => text,
                    Value::Null => continue,
                    other => other.to_string(),
                };
                values.insert(key, text);
            }
        }
        values.extend(query);
        Self(values)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<&str, Failure> {
        self.get(key)
            .ok_or_else(|| Failure::bad_request(&format!("{key} is empty")))
    }

    fn int(&self, key: &str) -> Result<Option<i64>, Failure> {
        self.get(key)
            .map(|v| {
                v.parse()
                    .map_err(|_| Failure::bad_request(&format!("{key} is invalid")))
            })
            .transpose()
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    fn json(&self, key: &str) -> Result<Option<Value>, Failure> {
        self.get(key)
            .map(|v| {
                serde_json::from_str(v)
                    .map_err(|_| Failure::bad_request(&format!("can't parse {key} JSON object")))
            })
            .transpose()
    }
}

async fn dispatch(
    State(db): State<Db>,
    Path((bot_token, method)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Reply {
    {
        let state = db.read().await;
        if bot_token.strip_prefix("bot") != Some(state.token.as_str()) {
            return Err(Failure::new(StatusCode::UNAUTHORIZED, "Unauthorized"));
        }
    }
    let params = Params::merge(query, &body);
    tracing::debug!(%method, params = params.0.len(), "dispatch");

    match method.as_str() {
        "getMe" => get_me(),
        "sendMessage" => send_message(&db, &params).await,
        "editMessageText" => edit_message_text(&db, &params).await,
        "deleteMessage" => delete_message(&db, &params).await,
        "setWebhook" => set_webhook(&db, &params).await,
        "deleteWebhook" => delete_webhook(&db).await,
        "getWebhookInfo" => get_webhook_info(&db).await,
        "getFile" => get_file(&params),
        "answerCallbackQuery" => answer_callback_query(&db, &params).await,
        _ => Err(Failure::new(StatusCode::NOT_FOUND, "Not Found")),
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn bot_user() -> Value {
    json!({
        "id": BOT_ID,
        "is_bot": true,
        "first_name": "Mock Bot",
        "username": "mock_bot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
    })
}

fn chat_json(chat_id: &str) -> Value {
    match chat_id.parse::<i64>() {
        Ok(id) if id > 0 => json!({ "id": id, "type": "private", "first_name": "Tester" }),
        Ok(id) => json!({ "id": id, "type": "supergroup", "title": "Test Group" }),
        Err(_) => json!({
            "id": -1_000_000_000_001_i64,
            "type": "channel",
            "title": chat_id.trim_start_matches('@'),
            "username": chat_id.trim_start_matches('@'),
        }),
    }
}

fn message_json(message: &StoredMessage) -> Value {
    let mut value = json!({
        "message_id": message.message_id,
        "from": bot_user(),
        "date": message.date,
        "chat": chat_json(&message.chat_id),
        "text": message.text,
    });
    if let Some(edit_date) = message.edit_date {
        value["edit_date"] = json!(edit_date);
    }
    if let Some(markup) = &message.reply_markup {
        value["reply_markup"] = markup.clone();
    }
    value
}

fn get_me() -> Reply {
    ok(bot_user())
}

async fn send_message(db: &Db, params: &Params) -> Reply {
    let chat_id = params.required("chat_id")?;
    let text = params
        .get("text")
        .ok_or_else(|| Failure::bad_request("message text is empty"))?;
    if text.contains("flood") {
        return Err(Failure {
            retry_after: Some(RETRY_AFTER),
            ..Failure::new(
                StatusCode::TOO_MANY_REQUESTS,
                format!("Too Many Requests: retry after {RETRY_AFTER}"),
            )
        });
    }
    let reply_markup = params
        .json("reply_markup")?
        .filter(|markup| markup.get("inline_keyboard").is_some());

    let mut state = db.write().await;
    state.last_message_id += 1;
    let message = StoredMessage {
        message_id: state.last_message_id,
        chat_id: chat_id.to_string(),
        text: text.to_string(),
        date: now(),
        edit_date: None,
        reply_markup,
    };
    state
        .messages
        .insert((message.chat_id.clone(), message.message_id), message.clone());
    ok(message_json(&message))
}

async fn edit_message_text(db: &Db, params: &Params) -> Reply {
    let text = params
        .get("text")
        .ok_or_else(|| Failure::bad_request("message text is empty"))?;
    if params.get("inline_message_id").is_some() {
        return ok(json!(true));
    }
    let chat_id = params.required("chat_id")?;
    let message_id = params
        .int("message_id")?
        .ok_or_else(|| Failure::bad_request("message identifier is not specified"))?;

    let mut state = db.write().await;
    let message = state
        .messages
        .get_mut(&(chat_id.to_string(), message_id))
        .ok_or_else(|| Failure::bad_request("message to edit not found"))?;
    if message.text == text {
        return Err(Failure::bad_request("message is not modified"));
    }
    message.text = text.to_string();
    message.edit_date = Some(now());
    if let Some(markup) = params.json("reply_markup")? {
        message.reply_markup = Some(markup);
    }
    ok(message_json(message))
}

async fn delete_message(db: &Db, params: &Params) -> Reply {
    let chat_id = params.required("chat_id")?;
    let message_id = params
        .int("message_id")?
        .ok_or_else(|| Failure::bad_request("message identifier is not specified"))?;
    let mut state = db.write().await;
    state
        .messages
        .remove(&(chat_id.to_string(), message_id))
        .ok_or_else(|| Failure::bad_request("message to delete not found"))?;
    ok(json!(true))
}

async fn set_webhook(db: &Db, params: &Params) -> Reply {
    let url = params.required("url")?;
    if !url.starts_with("https://") {
        return Err(Failure::bad_request("bad webhook: HTTPS url must be provided for webhook"));
    }
    let allowed_updates = params
        .json("allowed_updates")?
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|_| Failure::bad_request("can't parse allowed_updates JSON array"))
        })
        .transpose()?;
    let webhook = Webhook {
        url: url.to_string(),
        max_connections: params.int("max_connections")?,
        allowed_updates,
        ip_address: params.get("ip_address").map(str::to_string),
    };
    let mut state = db.write().await;
    if params.flag("drop_pending_updates") {
        tracing::debug!("dropping pending updates");
    }
    state.webhook = Some(webhook);
    ok(json!(true))
}

async fn delete_webhook(db: &Db) -> Reply {
    db.write().await.webhook = None;
    ok(json!(true))
}

async fn get_webhook_info(db: &Db) -> Reply {
    let state = db.read().await;
    let webhook = state.webhook.clone().unwrap_or_default();
    let mut info = json!({
        "url": webhook.url,
        "has_custom_certificate": false,
        "pending_update_count": 0,
    });
    if let Some(max_connections) = webhook.max_connections {
        info["max_connections"] = json!(max_connections);
    }
    if let Some(allowed_updates) = webhook.allowed_updates {
        info["allowed_updates"] = json!(allowed_updates);
    }
    if let Some(ip_address) = webhook.ip_address {
        info["ip_address"] = json!(ip_address);
    }
    ok(info)
}

fn get_file(params: &Params) -> Reply {
    let file_id = params.required("file_id")?;
    let unique = Uuid::new_v4().simple().to_string();
    ok(json!({
        "file_id": file_id,
        "file_unique_id": &unique[..16],
        "file_size": 1024,
        "file_path": format!("documents/file_{}.pdf", &unique[..8]),
    }))
}

async fn answer_callback_query(db: &Db, params: &Params) -> Reply {
    let id = params.required("callback_query_id")?;
    let mut state = db.write().await;
    if state.answered_callbacks.iter().any(|answered| answered == id) {
        return Err(Failure::bad_request(
            "query is too old and response timeout expired or query ID is invalid",
        ));
    }
    state.answered_callbacks.push(id.to_string());
    ok(json!(true))
}
