use std::sync::Arc;

use crate::{
    config::Config,
    error, info,
    management::{SessionState, TokenCache},
    server::{self, AppState},
    spotify::SpotifyClient,
    success, warning,
};

/// Starts the dashboard server and blocks until it stops.
///
/// Missing secrets are fatal. With `cache_token` the session starts from
/// the cached token (if any) and every new token is written back to the
/// cache. With `open` the dashboard is opened in the default browser.
pub async fn serve(cache_token: bool, open: bool) {
    let config = match Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => error!("Missing configuration: {}", e),
    };

    let client = SpotifyClient::new(Arc::clone(&config));
    let mut session = SessionState::new();

    let state = if cache_token {
        let cache = TokenCache::default();
        match cache.load().await {
            Ok(token) => {
                if token.is_expired() {
                    info!("Cached token has expired, log in again to refresh it.");
                } else {
                    info!("Restored token from {}", cache.path().display());
                }
                session = SessionState::with_token(token);
            }
            Err(_) => info!("No cached token at {}", cache.path().display()),
        }
        AppState::new(client, session).with_token_cache(cache)
    } else {
        AppState::new(client, session)
    };

    let listener = match server::bind(&config.server_address).await {
        Ok(l) => l,
        Err(e) => error!("Cannot listen on {}: {}", config.server_address, e),
    };

    let url = format!("http://{}/", config.server_address);
    success!("Dashboard running at {}", url);
    info!("Spotify redirects back to {}", config.redirect_uri);

    if open && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }

    if let Err(e) = server::serve(listener, state).await {
        error!("Dashboard server stopped: {}", e);
    }
}
