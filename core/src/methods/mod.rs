//! One builder per Bot API method.
//!
//! # Design
//! A builder is a serde struct: required parameters are constructor
//! arguments, optional ones are `Option` fields with fluent setters, and the
//! serialized struct *is* the parameter set (unset fields are dropped when the
//! request is built). Every builder ends in the same three methods generated
//! by `impl_method!`: `option`, `request` and `send`.
//!
//! Builders are obtained from the client, e.g. `client.send_message(chat, "hi")`.

use serde::Serialize;

use crate::client::Client;
use crate::request::RequestOption;

/// The non-parameter half of a builder: who sends it and with which options.
#[derive(Debug, Clone)]
pub(crate) struct Call<'a> {
    pub(crate) client: &'a Client,
    pub(crate) options: Vec<RequestOption>,
}

impl<'a> Call<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            options: Vec::new(),
        }
    }
}

/// Delivery parameters shared by the sending methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Forum topic to send to.
    pub message_thread_id: Option<i64>,
    /// Deliver silently.
    pub disable_notification: Option<bool>,
    /// Disallow forwarding and saving.
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<i64>,
    pub allow_sending_without_reply: Option<bool>,
}

macro_rules! impl_method {
    ($builder:ident, $endpoint:literal, $output:ty) => {
        impl<'a> $builder<'a> {
            /// Adds a request option for this call only.
            pub fn option(mut self, option: $crate::request::RequestOption) -> Self {
                self.call.options.push(option);
                self
            }

            /// The request descriptor this builder would send.
            pub fn request(&self) -> $crate::error::Result<$crate::request::Request> {
                $crate::request::Request::get($endpoint).with_params(self)
            }

            pub async fn send(
                self,
                ctx: &$crate::context::Context,
            ) -> $crate::error::Result<Vec<$output>> {
                let request = self.request()?;
                self.call
                    .client
                    .call(ctx, request, &self.call.options)
                    .await
            }
        }
    };
}

macro_rules! setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, $name: impl Into<$ty>) -> Self {
                self.$name = Some($name.into());
                self
            }
        )*
    };
}

macro_rules! delivery_setters {
    () => {
        pub fn message_thread_id(mut self, id: i64) -> Self {
            self.delivery.message_thread_id = Some(id);
            self
        }

        pub fn disable_notification(mut self, disable: bool) -> Self {
            self.delivery.disable_notification = Some(disable);
            self
        }

        pub fn protect_content(mut self, protect: bool) -> Self {
            self.delivery.protect_content = Some(protect);
            self
        }

        pub fn reply_to_message_id(mut self, id: i64) -> Self {
            self.delivery.reply_to_message_id = Some(id);
            self
        }

        pub fn allow_sending_without_reply(mut self, allow: bool) -> Self {
            self.delivery.allow_sending_without_reply = Some(allow);
            self
        }
    };
}

/// The four markup kinds share the `reply_markup` parameter; whichever is set
/// last is sent.
macro_rules! reply_markup_setters {
    () => {
        pub fn reply_markup(mut self, markup: impl Into<$crate::types::ReplyMarkup>) -> Self {
            self.reply_markup = Some(markup.into());
            self
        }

        pub fn inline_keyboard_markup(self, markup: $crate::types::InlineKeyboardMarkup) -> Self {
            self.reply_markup(markup)
        }

        pub fn reply_keyboard_markup(self, markup: $crate::types::ReplyKeyboardMarkup) -> Self {
            self.reply_markup(markup)
        }

        pub fn reply_keyboard_remove(self, markup: $crate::types::ReplyKeyboardRemove) -> Self {
            self.reply_markup(markup)
        }

        pub fn force_reply(self, markup: $crate::types::ForceReply) -> Self {
            self.reply_markup(markup)
        }
    };
}

mod account;
mod callback;
mod content;
mod edit;
mod file;
mod media;
mod send;
mod webhook;

pub use account::{
    Close, GetMe, GetMyDescription, GetMyName, GetMyShortDescription, LogOut, SetMyDescription,
    SetMyName, SetMyShortDescription,
};
pub use callback::AnswerCallbackQuery;
pub use content::{SendContact, SendDice, SendLocation, SendPoll, SendVenue};
pub use edit::{DeleteMessage, EditMessageReplyMarkup, EditMessageText};
pub use file::{GetFile, GetUserProfilePhotos};
pub use media::{
    SendAnimation, SendAudio, SendDocument, SendMediaGroup, SendPhoto, SendVideo, SendVideoNote,
    SendVoice,
};
pub use send::{CopyMessage, ForwardMessage, SendChatAction, SendMessage};
pub use webhook::{DeleteWebhook, GetWebhookInfo, SetWebhook};
