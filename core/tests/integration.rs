//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client over real
//! HTTP through the default reqwest transport. Validates that request
//! building, envelope classification and decoding agree with an actual
//! server speaking the platform's wire format.

use std::time::Duration;

use botapi_core::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use botapi_core::{Client, Context, Error, RequestOption};
use mock_server::TEST_TOKEN;

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

async fn client() -> Client {
    let api_url = start_server().await;
    Client::builder(TEST_TOKEN)
        .api_url(api_url)
        .timeout(Duration::from_secs(5))
        .debug(true)
        .build()
        .unwrap()
}

#[tokio::test]
async fn message_lifecycle() {
    let client = client().await;
    let ctx = Context::background();

    // Identity.
    let me = client.get_me().send(&ctx).await.unwrap();
    assert_eq!(me.len(), 1);
    assert!(me[0].is_bot);
    assert_eq!(me[0].username.as_deref(), Some("mock_bot"));

    // Send with an inline keyboard.
    let keyboard = InlineKeyboardMarkup::default()
        .row(vec![InlineKeyboardButton::callback("Ack", "ack")]);
    let sent = client
        .send_message(42, "deploy started")
        .inline_keyboard_markup(keyboard.clone())
        .send(&ctx)
        .await
        .unwrap();
    let message = &sent[0];
    assert_eq!(message.text.as_deref(), Some("deploy started"));
    assert_eq!(message.chat.id, 42);
    assert_eq!(message.reply_markup.as_ref(), Some(&keyboard));

    // Edit it.
    let edited = client
        .edit_message_text("deploy finished")
        .chat_id(42)
        .message_id(message.message_id)
        .send(&ctx)
        .await
        .unwrap();
    let edited = edited[0].message().unwrap();
    assert_eq!(edited.text.as_deref(), Some("deploy finished"));
    assert!(edited.edit_date.is_some());

    // Delete it, twice.
    let deleted = client
        .delete_message(42, message.message_id)
        .send(&ctx)
        .await
        .unwrap();
    assert_eq!(deleted, vec![true]);
    let err = client
        .delete_message(42, message.message_id)
        .send(&ctx)
        .await
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.status, 400);
    assert_eq!(api.description, "Bad Request: message to delete not found");
}

#[tokio::test]
async fn json_body_option_round_trips() {
    let client = client().await;
    let sent = client
        .send_message("@news", "posted as json")
        .option(RequestOption::json_body())
        .send(&Context::background())
        .await
        .unwrap();
    assert_eq!(sent[0].chat.username.as_deref(), Some("news"));
}

#[tokio::test]
async fn flood_control_surfaces_retry_after() {
    let client = client().await;
    let err = client
        .send_message(1, "flood")
        .send(&Context::background())
        .await
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.error_code, 429);
    assert_eq!(api.retry_after(), Some(mock_server::RETRY_AFTER));
}

#[tokio::test]
async fn wrong_token_is_unauthorized() {
    let api_url = start_server().await;
    let client = Client::builder("1:WRONG").api_url(api_url).build().unwrap();
    let err = client.get_me().send(&Context::background()).await.unwrap_err();
    assert_eq!(err.api_error().map(|e| e.error_code), Some(401));
}

#[tokio::test]
async fn webhook_settings_are_reported() {
    let client = client().await;
    let ctx = Context::background();

    let set = client
        .set_webhook("https://bot.example.com/hook")
        .max_connections(20)
        .allowed_updates(["message", "callback_query"])
        .send(&ctx)
        .await
        .unwrap();
    assert_eq!(set, vec![true]);

    let info = client.get_webhook_info().send(&ctx).await.unwrap();
    assert_eq!(info[0].url, "https://bot.example.com/hook");
    assert_eq!(info[0].max_connections, Some(20));
    assert_eq!(
        info[0].allowed_updates,
        Some(vec!["message".to_string(), "callback_query".to_string()])
    );

    client.delete_webhook().send(&ctx).await.unwrap();
    let info = client.get_webhook_info().send(&ctx).await.unwrap();
    assert!(info[0].url.is_empty());
}

#[tokio::test]
async fn file_download_address() {
    let client = client().await;
    let files = client
        .get_file("BQACAgIAAxkBAAIBZ")
        .send(&Context::background())
        .await
        .unwrap();
    let path = files[0].file_path.as_deref().unwrap();
    let url = client.file_url(path);
    assert!(url.contains(&format!("/file/bot{TEST_TOKEN}/documents/")));
}

#[tokio::test]
async fn callback_answer() {
    let client = client().await;
    let answered = client
        .answer_callback_query("cb-1")
        .text("Done")
        .send(&Context::background())
        .await
        .unwrap();
    assert_eq!(answered, vec![true]);
}

#[tokio::test]
async fn unsupported_method_is_not_found() {
    let client = client().await;
    let err = client
        .send_dice(1)
        .send(&Context::background())
        .await
        .unwrap_err();
    assert_eq!(err.api_error().map(|e| e.status), Some(404));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::builder(TEST_TOKEN)
        .api_url(format!("http://{addr}"))
        .build()
        .unwrap();
    let err = client.get_me().send(&Context::background()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn cancelled_context_stops_the_call() {
    let client = client().await;
    let ctx = Context::background();
    ctx.cancel();
    let err = client.get_me().send(&ctx).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}
