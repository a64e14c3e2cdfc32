use serde::Serialize;

use super::{Call, Delivery};
use crate::client::Client;
use crate::types::{ChatAction, ChatId, Message, MessageEntity, MessageId, ParseMode, ReplyMarkup};

/// `sendMessage`
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    text: String,
    parse_mode: Option<ParseMode>,
    entities: Option<Vec<MessageEntity>>,
    disable_web_page_preview: Option<bool>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendMessage<'a> {
    setters! {
        parse_mode: ParseMode,
        entities: Vec<MessageEntity>,
        disable_web_page_preview: bool,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendMessage, "/sendMessage", Message);

/// `forwardMessage`
#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessage<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    from_chat_id: ChatId,
    message_id: i64,
    #[serde(flatten)]
    delivery: Delivery,
}

impl<'a> ForwardMessage<'a> {
    delivery_setters!();
}

impl_method!(ForwardMessage, "/forwardMessage", Message);

/// `copyMessage`: like forwarding, but without a link to the original.
#[derive(Debug, Clone, Serialize)]
pub struct CopyMessage<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    from_chat_id: ChatId,
    message_id: i64,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
    caption_entities: Option<Vec<MessageEntity>>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> CopyMessage<'a> {
    setters! {
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(CopyMessage, "/copyMessage", MessageId);

/// `sendChatAction`: shows a status such as "typing..." for up to five seconds.
#[derive(Debug, Clone, Serialize)]
pub struct SendChatAction<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    action: ChatAction,
    message_thread_id: Option<i64>,
}

impl<'a> SendChatAction<'a> {
    setters! {
        message_thread_id: i64,
    }
}

impl_method!(SendChatAction, "/sendChatAction", bool);

impl Client {
    pub fn send_message(&self, chat_id: impl Into<ChatId>, text: impl Into<String>) -> SendMessage<'_> {
        SendMessage {
            call: Call::new(self),
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            entities: None,
            disable_web_page_preview: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn forward_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> ForwardMessage<'_> {
        ForwardMessage {
            call: Call::new(self),
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            delivery: Delivery::default(),
        }
    }

    pub fn copy_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> CopyMessage<'_> {
        CopyMessage {
            call: Call::new(self),
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_chat_action(&self, chat_id: impl Into<ChatId>, action: ChatAction) -> SendChatAction<'_> {
        SendChatAction {
            call: Call::new(self),
            chat_id: chat_id.into(),
            action,
            message_thread_id: None,
        }
    }
}
