use serde::Serialize;

use super::Call;
use crate::client::Client;

/// `answerCallbackQuery`: stops the button's progress indicator, optionally
/// showing a notification or an alert.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    #[serde(skip)]
    call: Call<'a>,
    callback_query_id: String,
    text: Option<String>,
    show_alert: Option<bool>,
    url: Option<String>,
    /// Seconds the answer may be cached client-side.
    cache_time: Option<i64>,
}

impl<'a> AnswerCallbackQuery<'a> {
    setters! {
        text: String,
        show_alert: bool,
        url: String,
        cache_time: i64,
    }
}

impl_method!(AnswerCallbackQuery, "/answerCallbackQuery", bool);

impl Client {
    pub fn answer_callback_query(&self, callback_query_id: impl Into<String>) -> AnswerCallbackQuery<'_> {
        AnswerCallbackQuery {
            call: Call::new(self),
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: None,
            url: None,
            cache_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::testing::{query_pairs, stub_client};

    #[tokio::test]
    async fn answer_with_alert() {
        let (client, stub) = stub_client(200, r#"{"ok":true,"result":true}"#);
        let answered = client
            .answer_callback_query("4382bfdwdsb323b2d9")
            .text("Saved!")
            .show_alert(true)
            .send(&Context::background())
            .await
            .unwrap();
        assert_eq!(answered, vec![true]);
        let pairs = query_pairs(&stub.last());
        assert_eq!(
            pairs,
            vec![
                ("callback_query_id".to_string(), "4382bfdwdsb323b2d9".to_string()),
                ("show_alert".to_string(), "true".to_string()),
                ("text".to_string(), "Saved!".to_string()),
            ]
        );
    }
}
