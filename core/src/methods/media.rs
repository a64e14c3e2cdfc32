//! Media sending methods. Files are referenced by id or URL; see [`InputFile`].

use serde::Serialize;

use super::{Call, Delivery};
use crate::client::Client;
use crate::types::{ChatId, InputFile, InputMedia, Message, MessageEntity, ParseMode, ReplyMarkup};

/// `sendPhoto`
#[derive(Debug, Clone, Serialize)]
pub struct SendPhoto<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    photo: InputFile,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
    caption_entities: Option<Vec<MessageEntity>>,
    has_spoiler: Option<bool>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendPhoto<'a> {
    setters! {
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        has_spoiler: bool,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendPhoto, "/sendPhoto", Message);

/// `sendAudio`: music shown in the player. Voice notes go through `sendVoice`.
#[derive(Debug, Clone, Serialize)]
pub struct SendAudio<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    audio: InputFile,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
    caption_entities: Option<Vec<MessageEntity>>,
    duration: Option<i64>,
    performer: Option<String>,
    title: Option<String>,
    thumbnail: Option<InputFile>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendAudio<'a> {
    setters! {
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        duration: i64,
        performer: String,
        title: String,
        thumbnail: InputFile,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendAudio, "/sendAudio", Message);

/// `sendDocument`
#[derive(Debug, Clone, Serialize)]
pub struct SendDocument<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    document: InputFile,
    thumbnail: Option<InputFile>,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
    caption_entities: Option<Vec<MessageEntity>>,
    disable_content_type_detection: Option<bool>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendDocument<'a> {
    setters! {
        thumbnail: InputFile,
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        disable_content_type_detection: bool,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendDocument, "/sendDocument", Message);

/// `sendVideo`
#[derive(Debug, Clone, Serialize)]
pub struct SendVideo<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    video: InputFile,
    duration: Option<i64>,
    width: Option<i64>,
    height: Option<i64>,
    thumbnail: Option<InputFile>,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
    caption_entities: Option<Vec<MessageEntity>>,
    has_spoiler: Option<bool>,
    supports_streaming: Option<bool>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendVideo<'a> {
    setters! {
        duration: i64,
        width: i64,
        height: i64,
        thumbnail: InputFile,
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        has_spoiler: bool,
        supports_streaming: bool,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendVideo, "/sendVideo", Message);

/// `sendAnimation`: GIF or H.264/MPEG-4 AVC video without sound.
#[derive(Debug, Clone, Serialize)]
pub struct SendAnimation<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    animation: InputFile,
    duration: Option<i64>,
    width: Option<i64>,
    height: Option<i64>,
    thumbnail: Option<InputFile>,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
    caption_entities: Option<Vec<MessageEntity>>,
    has_spoiler: Option<bool>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendAnimation<'a> {
    setters! {
        duration: i64,
        width: i64,
        height: i64,
        thumbnail: InputFile,
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        has_spoiler: bool,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendAnimation, "/sendAnimation", Message);

/// `sendVoice`
#[derive(Debug, Clone, Serialize)]
pub struct SendVoice<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    voice: InputFile,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
    caption_entities: Option<Vec<MessageEntity>>,
    duration: Option<i64>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendVoice<'a> {
    setters! {
        caption: String,
        parse_mode: ParseMode,
        caption_entities: Vec<MessageEntity>,
        duration: i64,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendVoice, "/sendVoice", Message);

/// `sendVideoNote`: a rounded square video of up to one minute.
#[derive(Debug, Clone, Serialize)]
pub struct SendVideoNote<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    video_note: InputFile,
    duration: Option<i64>,
    length: Option<i64>,
    thumbnail: Option<InputFile>,
    #[serde(flatten)]
    delivery: Delivery,
    reply_markup: Option<ReplyMarkup>,
}

impl<'a> SendVideoNote<'a> {
    setters! {
        duration: i64,
        length: i64,
        thumbnail: InputFile,
    }
    delivery_setters!();
    reply_markup_setters!();
}

impl_method!(SendVideoNote, "/sendVideoNote", Message);

/// `sendMediaGroup`: an album of two to ten items. Each envelope carries the
/// list of messages that were sent.
#[derive(Debug, Clone, Serialize)]
pub struct SendMediaGroup<'a> {
    #[serde(skip)]
    call: Call<'a>,
    chat_id: ChatId,
    media: Vec<InputMedia>,
    #[serde(flatten)]
    delivery: Delivery,
}

impl<'a> SendMediaGroup<'a> {
    delivery_setters!();
}

impl_method!(SendMediaGroup, "/sendMediaGroup", Vec<Message>);

impl Client {
    pub fn send_photo(&self, chat_id: impl Into<ChatId>, photo: impl Into<InputFile>) -> SendPhoto<'_> {
        SendPhoto {
            call: Call::new(self),
            chat_id: chat_id.into(),
            photo: photo.into(),
            caption: None,
            parse_mode: None,
            caption_entities: None,
            has_spoiler: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_audio(&self, chat_id: impl Into<ChatId>, audio: impl Into<InputFile>) -> SendAudio<'_> {
        SendAudio {
            call: Call::new(self),
            chat_id: chat_id.into(),
            audio: audio.into(),
            caption: None,
            parse_mode: None,
            caption_entities: None,
            duration: None,
            performer: None,
            title: None,
            thumbnail: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_document(
        &self,
        chat_id: impl Into<ChatId>,
        document: impl Into<InputFile>,
    ) -> SendDocument<'_> {
        SendDocument {
            call: Call::new(self),
            chat_id: chat_id.into(),
            document: document.into(),
            thumbnail: None,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            disable_content_type_detection: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_video(&self, chat_id: impl Into<ChatId>, video: impl Into<InputFile>) -> SendVideo<'_> {
        SendVideo {
            call: Call::new(self),
            chat_id: chat_id.into(),
            video: video.into(),
            duration: None,
            width: None,
            height: None,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            has_spoiler: None,
            supports_streaming: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_animation(
        &self,
        chat_id: impl Into<ChatId>,
        animation: impl Into<InputFile>,
    ) -> SendAnimation<'_> {
        SendAnimation {
            call: Call::new(self),
            chat_id: chat_id.into(),
            animation: animation.into(),
            duration: None,
            width: None,
            height: None,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            has_spoiler: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_voice(&self, chat_id: impl Into<ChatId>, voice: impl Into<InputFile>) -> SendVoice<'_> {
        SendVoice {
            call: Call::new(self),
            chat_id: chat_id.into(),
            voice: voice.into(),
            caption: None,
            parse_mode: None,
            caption_entities: None,
            duration: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_video_note(
        &self,
        chat_id: impl Into<ChatId>,
        video_note: impl Into<InputFile>,
    ) -> SendVideoNote<'_> {
        SendVideoNote {
            call: Call::new(self),
            chat_id: chat_id.into(),
            video_note: video_note.into(),
            duration: None,
            length: None,
            thumbnail: None,
            delivery: Delivery::default(),
            reply_markup: None,
        }
    }

    pub fn send_media_group(
        &self,
        chat_id: impl Into<ChatId>,
        media: Vec<InputMedia>,
    ) -> SendMediaGroup<'_> {
        SendMediaGroup {
            call: Call::new(self),
            chat_id: chat_id.into(),
            media,
            delivery: Delivery::default(),
        }
    }
}
