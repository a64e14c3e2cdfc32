//! Data-transfer records mirroring the Bot API schema.
//!
//! # Design
//! Records are plain serde types with no behaviour. Every field the platform
//! may omit is an `Option`; records that callers send (keyboards, entities,
//! input media) skip unset fields when serialized so they never put `null`s
//! on the wire.

mod bot;
mod chat;
mod input;
mod markup;
mod media;
mod message;
mod query;
mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use bot::{
    BotCommand, BotCommandScope, BotDescription, BotName, BotShortDescription, MenuButton,
    WebhookInfo,
};
pub use chat::{
    Chat, ChatAdministratorRights, ChatInviteLink, ChatJoinRequest, ChatLocation, ChatMember,
    ChatMemberAdministrator, ChatMemberBanned, ChatMemberLeft, ChatMemberMember, ChatMemberOwner,
    ChatMemberRestricted, ChatMemberUpdated, ChatPermissions, ChatPhoto, ChatType,
};
pub use input::{
    InputFile, InputMedia, InputMediaAnimation, InputMediaAudio, InputMediaDocument,
    InputMediaPhoto, InputMediaVideo,
};
pub use markup::{
    CallbackGame, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
    KeyboardButtonPollType, KeyboardButtonRequestChat, KeyboardButtonRequestUser, LoginUrl,
    ReplyKeyboardMarkup, ReplyKeyboardRemove, ReplyMarkup, SwitchInlineQueryChosenChat,
};
pub use media::{
    Animation, Audio, Contact, Dice, Document, File, Game, Invoice, Location, PassportData,
    PhotoSize, Poll, PollAnswer, PollOption, Sticker, Story, SuccessfulPayment, Venue, Video,
    VideoNote, Voice,
};
pub use message::{
    ChatShared, EditedMessage, ForumTopic, ForumTopicClosed, ForumTopicCreated, ForumTopicEdited,
    ForumTopicReopened, GeneralForumTopicHidden, GeneralForumTopicUnhidden, Message,
    MessageAutoDeleteTimerChanged, MessageEntity, MessageEntityKind, MessageId,
    ProximityAlertTriggered, UserShared, VideoChatEnded, VideoChatParticipantsInvited,
    VideoChatScheduled, VideoChatStarted, WebAppData, WriteAccessAllowed,
};
pub use query::{
    CallbackQuery, ChosenInlineResult, InlineQuery, OrderInfo, PreCheckoutQuery, ShippingAddress,
    ShippingQuery,
};
pub use user::{User, UserProfilePhotos, WebAppInfo};

pub use crate::error::ResponseParameters;

/// Target chat: a numeric identifier or a channel `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        ChatId::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        ChatId::Username(username)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

/// Formatting dialect for text and captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    MarkdownV2,
    Markdown,
    #[serde(rename = "HTML")]
    Html,
}

/// Activity shown to the other side of a chat by `sendChatAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollType {
    Regular,
    Quiz,
}
