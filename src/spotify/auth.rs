use std::{fmt, future::Future};

use chrono::Utc;
use reqwest::Url;

use crate::{
    config::Config,
    spotify::SpotifyClient,
    types::{Token, TokenErrorResponse, TokenResponse},
};

#[derive(Debug)]
pub enum AuthError {
    /// The token endpoint refused the code (invalid, expired or already used).
    Rejected { status: u16, message: String },
    /// The request never produced a usable response.
    Transport(reqwest::Error),
    /// The callback's `state` did not match the one issued by `/login`.
    StateMismatch,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Rejected { status, message } => {
                write!(f, "token endpoint rejected the code ({}): {}", status, message)
            }
            AuthError::Transport(e) => write!(f, "token request failed: {}", e),
            AuthError::StateMismatch => f.write_str("authorization state does not match"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err)
    }
}

/// Anything able to trade an authorization code for a token.
///
/// [`SpotifyClient`] talks to the real token endpoint; tests plug in fakes
/// to observe how often an exchange happens.
pub trait CodeExchanger {
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<Token, AuthError>> + Send;
}

/// Builds the provider URL the user is sent to for consent.
///
/// The URL carries `client_id`, `response_type=code`, `redirect_uri`,
/// `scope` and the anti-forgery `state` issued for this login attempt.
///
/// # Errors
///
/// Fails if the configured authorization URL is not a valid URL.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config, "Xy12...")?;
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config, state: &str) -> Result<Url, String> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| format!("invalid {}: {}", crate::config::ENV_AUTH_URL, e))
}

impl CodeExchanger for SpotifyClient {
    /// Exchanges an authorization code at the token endpoint.
    ///
    /// The client authenticates with HTTP Basic credentials (client id and
    /// secret). Exactly one request is sent; nothing is retried.
    async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        let config = self.config();
        let res = self
            .http()
            .post(&config.token_url)
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(e) => e.error_description.unwrap_or(e.error),
                Err(_) => body,
            };
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = res.json().await?;
        Ok(Token::from_response(body, Utc::now().timestamp()))
    }
}
