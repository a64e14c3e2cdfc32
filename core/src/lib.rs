//! Typed async client for the Telegram Bot API.
//!
//! # Overview
//! Every method funnels through one pipeline: a builder serializes its
//! parameters into a [`Request`], the [`Client`] finalizes it into a plain
//! [`HttpRequest`], a [`Transport`] performs the round trip, and the response
//! envelope is classified and decoded into a typed list.
//!
//! ```no_run
//! # async fn run() -> botapi_core::Result<()> {
//! use botapi_core::{Client, Context};
//!
//! let client = Client::new("123456:ABC-DEF")?;
//! let me = client.get_me().send(&Context::background()).await?;
//! client.send_message(42, format!("hello from {}", me[0].first_name))
//!     .disable_notification(true)
//!     .send(&Context::background())
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `Client` is shared, read-only configuration; only the debug flag changes.
//! - Building and parsing never touch the network (`Client::finalize`,
//!   `Client::parse_response`), so the pipeline is testable without a server.
//! - One attempt per call: no retries, no backoff.
//! - Domain records live in [`types`] and are defined independently from the
//!   mock server; integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod methods;
pub mod params;
pub mod request;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ConfigError};
pub use context::Context;
pub use error::{ApiError, Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::Params;
pub use request::{Request, RequestOption};
pub use transport::{ReqwestTransport, Transport, TransportOptions};
