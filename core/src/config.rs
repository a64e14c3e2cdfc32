//! File and environment configuration for a [`Client`](crate::Client).
//!
//! Values are layered with figment: an optional TOML file first, then
//! `BOTAPI_*` environment variables on top (`BOTAPI_TOKEN`, `BOTAPI_API_URL`,
//! `BOTAPI_PROXY_URL`, ...).

use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::transport::TransportOptions;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_USER_AGENT: &str = "botapi-rs";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub debug: bool,
    /// Clock skew against the platform, in milliseconds.
    #[serde(default)]
    pub time_offset: i64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: default_api_url(),
            proxy_url: None,
            danger_accept_invalid_certs: false,
            timeout_secs: None,
            user_agent: default_user_agent(),
            debug: false,
            time_offset: 0,
        }
    }

    /// Loads `path` (when given and present) with `BOTAPI_*` overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config = figment.merge(Env::prefixed("BOTAPI_")).extract()?;
        Ok(config)
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            proxy_url: self.proxy_url.clone(),
            danger_accept_invalid_certs: self.danger_accept_invalid_certs,
            user_agent: Some(self.user_agent.clone()),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
