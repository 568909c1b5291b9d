//! # API Module
//!
//! HTTP endpoints of the dashboard server.
//!
//! ## Endpoints
//!
//! - [`dashboard`] - `GET /` and `GET /callback`. Renders the dashboard for
//!   the selected time range, or the login prompt when there is no valid
//!   token. Also receives the provider's redirect (`code`, `state`).
//! - [`login`] - `GET /login`, redirects to the provider's consent screen.
//! - [`logout`] - `GET /logout`, forgets the session token.
//! - [`export_csv`] - `GET /export.csv`, the top tracks as CSV download.
//! - [`health`] - `GET /health`, status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sporldash::api::{dashboard, health};
//!
//! let app = Router::new()
//!     .route("/", get(dashboard))
//!     .route("/health", get(health));
//! ```

mod auth;
mod dashboard;
mod export;
mod health;

pub use auth::login;
pub use auth::logout;
pub use dashboard::DashboardParams;
pub use dashboard::dashboard;
pub use export::export_csv;
pub use health::health;

use crate::{types::TimeRange, warning};

/// Reads the `time_range` query parameter, falling back to the default.
pub fn parse_time_range(raw: Option<&str>) -> TimeRange {
    match raw {
        None | Some("") => TimeRange::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warning!("{}, using {}", e, TimeRange::default());
            TimeRange::default()
        }),
    }
}
