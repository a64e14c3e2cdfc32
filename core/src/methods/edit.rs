use serde::Serialize;

use super::Call;
use crate::client::Client;
use crate::types::{ChatId, EditedMessage, InlineKeyboardMarkup, MessageEntity, ParseMode};

/// `editMessageText`. Address the message either with `chat_id` and
/// `message_id`, or with `inline_message_id`.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageText<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: Option<ChatId>,
    message_id: Option<i64>,
    inline_message_id: Option<String>,
    text: String,
    parse_mode: Option<ParseMode>,
    entities: Option<Vec<MessageEntity>>,
    disable_web_page_preview: Option<bool>,
    reply_markup: Option<InlineKeyboardMarkup>,
}

impl<'a> EditMessageText<'a> {
    setters! {
        chat_id: ChatId,
        message_id: i64,
        inline_message_id: String,
        parse_mode: ParseMode,
        entities: Vec<MessageEntity>,
        disable_web_page_preview: bool,
        reply_markup: InlineKeyboardMarkup,
    }
}

impl_method!(EditMessageText, "/editMessageText", EditedMessage);

/// `editMessageReplyMarkup`. Without a markup the inline keyboard is removed.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageReplyMarkup<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: Option<ChatId>,
    message_id: Option<i64>,
    inline_message_id: Option<String>,
    reply_markup: Option<InlineKeyboardMarkup>,
}

impl<'a> EditMessageReplyMarkup<'a> {
    setters! {
        chat_id: ChatId,
        message_id: i64,
        inline_message_id: String,
        reply_markup: InlineKeyboardMarkup,
    }
}

impl_method!(EditMessageReplyMarkup, "/editMessageReplyMarkup", EditedMessage);

/// `deleteMessage`. Messages older than 48 hours can only be deleted in some chats.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteMessage<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    message_id: i64,
}

impl_method!(DeleteMessage, "/deleteMessage", bool);

impl Client {
    pub fn edit_message_text(&self, text: impl Into<String>) -> EditMessageText<'_> {
        EditMessageText {
            call: Call::new(self),
            chat_id: None,
            message_id: None,
            inline_message_id: None,
            text: text.into(),
            parse_mode: None,
            entities: None,
            disable_web_page_preview: None,
            reply_markup: None,
        }
    }

    pub fn edit_message_reply_markup(&self) -> EditMessageReplyMarkup<'_> {
        EditMessageReplyMarkup {
            call: Call::new(self),
            chat_id: None,
            message_id: None,
            inline_message_id: None,
            reply_markup: None,
        }
    }

    pub fn delete_message(&self, chat_id: impl Into<ChatId>, message_id: i64) -> DeleteMessage<'_> {
        DeleteMessage {
            call: Call::new(self),
            chat_id: chat_id.into(),
            message_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::testing::stub_client;
    use crate::types::{EditedMessage, InlineKeyboardButton, InlineKeyboardMarkup};

    #[tokio::test]
    async fn edit_text_returns_edited_message() {
        let (client, stub) = stub_client(
            200,
            r#"{"ok":true,"result":{"message_id":9,"date":1,"edit_date":2,"chat":{"id":7,"type":"private"},"text":"new"}}"#,
        );
        let edited = client
            .edit_message_text("new")
            .chat_id(7)
            .message_id(9)
            .send(&Context::background())
            .await
            .unwrap();
        let message = edited[0].message().unwrap();
        assert_eq!(message.edit_date, Some(2));
        assert!(stub.last().url.contains("/editMessageText?"));
    }

    #[tokio::test]
    async fn inline_edit_returns_true() {
        let (client, _) = stub_client(200, r#"{"ok":true,"result":true}"#);
        let edited = client
            .edit_message_reply_markup()
            .inline_message_id("AAEC")
            .reply_markup(
                InlineKeyboardMarkup::default()
                    .row(vec![InlineKeyboardButton::callback("Done", "done")]),
            )
            .send(&Context::background())
            .await
            .unwrap();
        assert_eq!(edited, vec![EditedMessage::Inline(true)]);
    }

    #[test]
    fn edit_markup_without_target_sends_nothing_extra() {
        let (client, _) = stub_client(200, "{}");
        let request = client.edit_message_reply_markup().request().unwrap();
        assert!(request.query.is_empty());
    }

    #[test]
    fn delete_message_params() {
        let (client, _) = stub_client(200, "{}");
        let request = client.delete_message("@news", 12).request().unwrap();
        assert_eq!(request.query.get("chat_id"), Some("@news"));
        assert_eq!(request.query.get("message_id"), Some("12"));
    }
}
