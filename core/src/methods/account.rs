use serde::Serialize;

use super::Call;
use crate::client::Client;
use crate::types::{BotDescription, BotName, BotShortDescription, User};

/// `getMe`: the bot's own account.
#[derive(Debug, Clone, Serialize)]
pub struct GetMe<'a> {
    #[serde(skip)]
    call: Call<'a>,
}

impl_method!(GetMe, "/getMe", User);

/// `logOut`: logs the bot out of the cloud Bot API server before moving it to a local one.
#[derive(Debug, Clone, Serialize)]
pub struct LogOut<'a> {
    #[serde(skip)]
    call: Call<'a>,
}

impl_method!(LogOut, "/logOut", bool);

/// `close`: closes the bot instance before moving it between local servers.
#[derive(Debug, Clone, Serialize)]
pub struct Close<'a> {
    #[serde(skip)]
    call: Call<'a>,
}

impl_method!(Close, "/close", bool);

#[derive(Debug, Clone, Serialize)]
pub struct SetMyName<'a> {
    #[serde(skip)]
    call: Call<'a>,
    name: Option<String>,
    language_code: Option<String>,
}

impl<'a> SetMyName<'a> {
    setters! {
        name: String,
        language_code: String,
    }
}

impl_method!(SetMyName, "/setMyName", bool);

#[derive(Debug, Clone, Serialize)]
pub struct GetMyName<'a> {
    #[serde(skip)]
    call: Call<'a>,
    language_code: Option<String>,
}

impl<'a> GetMyName<'a> {
    setters! {
        language_code: String,
    }
}

impl_method!(GetMyName, "/getMyName", BotName);

#[derive(Debug, Clone, Serialize)]
pub struct SetMyDescription<'a> {
    #[serde(skip)]
    call: Call<'a>,
    description: Option<String>,
    language_code: Option<String>,
}

impl<'a> SetMyDescription<'a> {
    setters! {
        description: String,
        language_code: String,
    }
}

impl_method!(SetMyDescription, "/setMyDescription", bool);

#[derive(Debug, Clone, Serialize)]
pub struct GetMyDescription<'a> {
    #[serde(skip)]
    call: Call<'a>,
    language_code: Option<String>,
}

impl<'a> GetMyDescription<'a> {
    setters! {
        language_code: String,
    }
}

impl_method!(GetMyDescription, "/getMyDescription", BotDescription);

#[derive(Debug, Clone, Serialize)]
pub struct SetMyShortDescription<'a> {
    #[serde(skip)]
    call: Call<'a>,
    short_description: Option<String>,
    language_code: Option<String>,
}

impl<'a> SetMyShortDescription<'a> {
    setters! {
        short_description: String,
        language_code: String,
    }
}

impl_method!(SetMyShortDescription, "/setMyShortDescription", bool);

#[derive(Debug, Clone, Serialize)]
pub struct GetMyShortDescription<'a> {
    #[serde(skip)]
    call: Call<'a>,
    language_code: Option<String>,
}

impl<'a> GetMyShortDescription<'a> {
    setters! {
        language_code: String,
    }
}

impl_method!(GetMyShortDescription, "/getMyShortDescription", BotShortDescription);

impl Client {
    pub fn get_me(&self) -> GetMe<'_> {
        GetMe {
            call: Call::new(self),
        }
    }

    pub fn log_out(&self) -> LogOut<'_> {
        LogOut {
            call: Call::new(self),
        }
    }

    pub fn close(&self) -> Close<'_> {
        Close {
            call: Call::new(self),
        }
    }

    /// Without a name, the name for the given language is removed.
    pub fn set_my_name(&self) -> SetMyName<'_> {
        SetMyName {
            call: Call::new(self),
            name: None,
            language_code: None,
        }
    }

    pub fn get_my_name(&self) -> GetMyName<'_> {
        GetMyName {
            call: Call::new(self),
            language_code: None,
        }
    }

    pub fn set_my_description(&self) -> SetMyDescription<'_> {
        SetMyDescription {
            call: Call::new(self),
            description: None,
            language_code: None,
        }
    }

    pub fn get_my_description(&self) -> GetMyDescription<'_> {
        GetMyDescription {
            call: Call::new(self),
            language_code: None,
        }
    }

    pub fn set_my_short_description(&self) -> SetMyShortDescription<'_> {
        SetMyShortDescription {
            call: Call::new(self),
            short_description: None,
            language_code: None,
        }
    }

    pub fn get_my_short_description(&self) -> GetMyShortDescription<'_> {
        GetMyShortDescription {
            call: Call::new(self),
            language_code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::error::Error;
    use crate::testing::stub_client;

    #[tokio::test]
    async fn get_me_yields_single_user() {
        let (client, stub) = stub_client(
            200,
            r#"{"ok":true,"result":{"id":42,"is_bot":true,"first_name":"Bot"}}"#,
        );
        let users = client.get_me().send(&Context::background()).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 42);
        assert!(users[0].is_bot);
        assert!(stub.last().url.ends_with("/bot123:TEST/getMe"));
        assert!(stub.last().body.is_none());
    }

    #[tokio::test]
    async fn get_my_name_decodes_bot_name() {
        let (client, stub) = stub_client(200, r#"{"ok":true,"result":{"name":"Helper"}}"#);
        let names = client
            .get_my_name()
            .language_code("de")
            .send(&Context::background())
            .await
            .unwrap();
        assert_eq!(names[0].name, "Helper");
        assert!(stub.last().url.ends_with("/getMyName?language_code=de"));
    }

    #[tokio::test]
    async fn log_out_unauthorized() {
        let (client, _) = stub_client(
            401,
            r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
        );
        let err = client.log_out().send(&Context::background()).await.unwrap_err();
        assert!(matches!(err, Error::Api(ref api) if api.error_code == 401));
    }

    #[test]
    fn set_my_short_description_without_fields_has_no_query() {
        let (client, _) = stub_client(200, "{}");
        let request = client.set_my_short_description().request().unwrap();
        assert_eq!(request.endpoint, "/setMyShortDescription");
        assert!(request.query.is_empty());
    }
}
