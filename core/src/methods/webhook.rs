use serde::Serialize;

use super::Call;
use crate::client::Client;
use crate::types::{InputFile, WebhookInfo};

/// `setWebhook`: updates are then pushed to `url` and `getUpdates` stops working.
#[derive(Debug, Clone, Serialize)]
pub struct SetWebhook<'a> {
    #[serde(skip)]
    call: Call<'a>,
    url: String,
    certificate: Option<InputFile>,
    ip_address: Option<String>,
    max_connections: Option<i64>,
    allowed_updates: Option<Vec<String>>,
    drop_pending_updates: Option<bool>,
    /// Echoed back in the `X-Telegram-Bot-Api-Secret-Token` header of every push.
    secret_token: Option<String>,
}

impl<'a> SetWebhook<'a> {
    setters! {
        certificate: InputFile,
        ip_address: String,
        max_connections: i64,
        drop_pending_updates: bool,
        secret_token: String,
    }

    pub fn allowed_updates<I, S>(mut self, updates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_updates = Some(updates.into_iter().map(Into::into).collect());
        self
    }
}

impl_method!(SetWebhook, "/setWebhook", bool);

#[derive(Debug, Clone, Serialize)]
pub struct DeleteWebhook<'a> {
    #[serde(skip)]
    call: Call<'a>,
    drop_pending_updates: Option<bool>,
}

impl<'a> DeleteWebhook<'a> {
    setters! {
        drop_pending_updates: bool,
    }
}

impl_method!(DeleteWebhook, "/deleteWebhook", bool);

#[derive(Debug, Clone, Serialize)]
pub struct GetWebhookInfo<'a> {
    #[serde(skip)]
    call: Call<'a>,
}

impl_method!(GetWebhookInfo, "/getWebhookInfo", WebhookInfo);

impl Client {
    pub fn set_webhook(&self, url: impl Into<String>) -> SetWebhook<'_> {
        SetWebhook {
            call: Call::new(self),
            url: url.into(),
            certificate: None,
            ip_address: None,
            max_connections: None,
            allowed_updates: None,
            drop_pending_updates: None,
            secret_token: None,
        }
    }

    pub fn delete_webhook(&self) -> DeleteWebhook<'_> {
        DeleteWebhook {
            call: Call::new(self),
            drop_pending_updates: None,
        }
    }

    pub fn get_webhook_info(&self) -> GetWebhookInfo<'_> {
        GetWebhookInfo {
            call: Call::new(self),
        }
    }
}
