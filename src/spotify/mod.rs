//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API the dashboard needs.
//!
//! ## Overview
//!
//! ```text
//! Dashboard / CLI
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code flow, client secret)
//!     └── Top Items (tracks, artists)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts service / Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - authorize URL construction and the one-shot code exchange
//!   ([`auth::CodeExchanger`]).
//! - [`top`] - `GET /me/top/tracks` and `GET /me/top/artists`
//!   ([`top::TopItemsSource`]).
//!
//! Both capabilities are traits so the session and dashboard logic can be
//! exercised without network access. [`SpotifyClient`] implements both.
//!
//! ## Error Handling
//!
//! Nothing here retries. Authentication failures are reported as
//! [`auth::AuthError`] and turned into a login prompt by the session layer;
//! any other HTTP failure is a `reqwest::Error` that propagates to the
//! caller as a failed render.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - authorization code exchange
//! - `GET /me/top/tracks` - top tracks for a time range
//! - `GET /me/top/artists` - top artists for a time range

use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;

pub mod auth;
pub mod top;

/// HTTP client bound to one application configuration.
///
/// Cheap to clone: the configuration is shared and `reqwest::Client` is
/// reference counted internally.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    config: Arc<Config>,
    http: Client,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}
