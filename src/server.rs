use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    Res, api,
    management::{SessionState, TokenCache},
    spotify::SpotifyClient,
    types::Token,
    warning,
};

/// Everything a request handler can reach.
///
/// There is exactly one session: the dashboard serves a single user.
#[derive(Clone)]
pub struct AppState {
    pub client: SpotifyClient,
    pub session: Arc<Mutex<SessionState>>,
    pub token_cache: Option<Arc<TokenCache>>,
}

impl AppState {
    pub fn new(client: SpotifyClient, session: SessionState) -> Self {
        Self {
            client,
            session: Arc::new(Mutex::new(session)),
            token_cache: None,
        }
    }

    pub fn with_token_cache(mut self, cache: TokenCache) -> Self {
        self.token_cache = Some(Arc::new(cache));
        self
    }

    /// Writes a freshly obtained token to the cache, if one is configured.
    pub async fn remember(&self, token: &Token) {
        if let Some(cache) = &self.token_cache {
            if let Err(e) = cache.persist(token).await {
                warning!(
                    "Failed to cache token at {}: {}",
                    cache.path().display(),
                    e
                );
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::dashboard))
        .route("/callback", get(api::dashboard))
        .route("/login", get(api::login))
        .route("/logout", get(api::logout))
        .route("/export.csv", get(api::export_csv))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

/// Serves the dashboard on an already bound listener until the process ends.
pub async fn serve(listener: TcpListener, state: AppState) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn bind(address: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| format!("Failed to parse server address '{}': {}", address, e))?;
    Ok(TcpListener::bind(&addr).await?)
}
