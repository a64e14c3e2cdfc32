use serde::Serialize;

use super::Call;
use crate::client::Client;
use crate::types::{File, UserProfilePhotos};

/// `getFile`: prepares a file for download via [`Client::file_url`].
#[derive(Debug, Clone, Serialize)]
pub struct GetFile<'a> {
    #[serde(skip)]
    call: Call<'a>,
    file_id: String,
}

impl_method!(GetFile, "/getFile", File);

#[derive(Debug, Clone, Serialize)]
pub struct GetUserProfilePhotos<'a> {
    #[serde(skip)]
    call: Call<'a>,
    user_id: i64,
    /// Sequential number of the first photo to be returned.
    offset: Option<i64>,
    /// 1 to 100, platform default 100.
    limit: Option<i64>,
}

impl<'a> GetUserProfilePhotos<'a> {
    setters! {
        offset: i64,
        limit: i64,
    }
}

impl_method!(GetUserProfilePhotos, "/getUserProfilePhotos", UserProfilePhotos);

impl Client {
    pub fn get_file(&self, file_id: impl Into<String>) -> GetFile<'_> {
        GetFile {
            call: Call::new(self),
            file_id: file_id.into(),
        }
    }

    pub fn get_user_profile_photos(&self, user_id: i64) -> GetUserProfilePhotos<'_> {
        GetUserProfilePhotos {
            call: Call::new(self),
            user_id,
            offset: None,
            limit: None,
        }
    }
}
