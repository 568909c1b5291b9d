//! Session token holder.
//!
//! A dashboard session owns at most one [`Token`]. On every render the
//! handler passes the session into [`get_valid_token`], which either hands
//! back the stored token, trades a freshly received authorization code for a
//! new one, or reports that the user has to log in (again).
//!
//! ```text
//!            code received             exchange ok
//! NoToken ───────────────▶ PendingExchange ─────────▶ Valid
//!    ▲                           │                       │
//!    └─────── exchange failed ───┘                       │ expires_at passed
//!                                 ▲                      ▼
//!                                 └──── re-login ──── Expired
//! ```

use std::collections::HashSet;

use chrono::Utc;

use crate::{
    info,
    spotify::auth::{AuthError, CodeExchanger},
    types::Token,
    utils, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    PendingExchange,
    Valid,
    Expired,
}

#[derive(Debug, Default)]
pub struct SessionState {
    token: Option<Token>,
    pending_code: Option<String>,
    consumed_codes: HashSet<String>,
    login_state: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session that already holds `token`, e.g. one restored from
    /// the token cache.
    pub fn with_token(token: Token) -> Self {
        Self {
            token: Some(token),
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn state_at(&self, now: i64) -> TokenState {
        if self.pending_code.is_some() {
            return TokenState::PendingExchange;
        }

        match &self.token {
            None => TokenState::NoToken,
            Some(t) if t.is_expired_at(now) => TokenState::Expired,
            Some(_) => TokenState::Valid,
        }
    }

    pub fn state(&self) -> TokenState {
        self.state_at(Utc::now().timestamp())
    }

    pub fn has_consumed(&self, code: &str) -> bool {
        self.consumed_codes.contains(code)
    }

    /// Issues the anti-forgery `state` for a new login attempt.
    ///
    /// Any previously issued value is replaced, so only the most recent
    /// login link can complete.
    pub fn begin_login(&mut self) -> String {
        let state = utils::generate_state();
        self.login_state = Some(state.clone());
        state
    }

    /// Checks the `state` echoed by the provider against the issued one.
    ///
    /// The issued value is single use and gets cleared either way.
    pub fn verify_login_state(&mut self, returned: Option<&str>) -> Result<(), AuthError> {
        match (self.login_state.take(), returned) {
            (Some(expected), Some(got)) if expected == got => Ok(()),
            _ => Err(AuthError::StateMismatch),
        }
    }

    /// Forgets the token (logout). Consumed codes stay consumed.
    pub fn clear(&mut self) {
        self.token = None;
        self.pending_code = None;
        self.login_state = None;
    }
}

/// Returns a usable token for this render, if there is one.
///
/// - A stored token that has not expired is returned unchanged without any
///   network traffic.
/// - Otherwise an `incoming_code` this session has never seen is marked as
///   consumed and exchanged exactly once. On success the new token is
///   stored and returned.
/// - In every other case the result is `None` and the caller shows the
///   login prompt. A failed exchange is logged and also yields `None`.
///
/// An expired token is never returned; it stays in the session only so
/// that [`SessionState::state`] can report [`TokenState::Expired`].
pub async fn get_valid_token<E: CodeExchanger>(
    session: &mut SessionState,
    incoming_code: Option<&str>,
    exchanger: &E,
) -> Option<Token> {
    get_valid_token_at(session, incoming_code, exchanger, Utc::now().timestamp()).await
}

/// [`get_valid_token`] evaluated at an explicit point in time (unix seconds).
pub async fn get_valid_token_at<E: CodeExchanger>(
    session: &mut SessionState,
    incoming_code: Option<&str>,
    exchanger: &E,
    now: i64,
) -> Option<Token> {
    if let Some(token) = &session.token {
        if !token.is_expired_at(now) {
            return Some(token.clone());
        }
    }

    let code = incoming_code.filter(|c| !c.is_empty() && !session.has_consumed(c))?;

    // consumed before the request goes out: a failed exchange burns the code too
    session.consumed_codes.insert(code.to_string());

    let pending = PendingExchange::begin(session, code);
    let result = exchanger.exchange_code(code).await;
    drop(pending);

    match result {
        Ok(token) => {
            info!("Authorization code exchanged, token valid until {}", token.expires_at);
            session.token = Some(token.clone());
            Some(token)
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            session.token = None;
            None
        }
    }
}

/// Marks the session as exchanging `code` for as long as it is alive.
///
/// Dropping it, also when the surrounding future is cancelled mid-request,
/// leaves the session without a pending code.
struct PendingExchange<'a> {
    session: &'a mut SessionState,
}

impl<'a> PendingExchange<'a> {
    fn begin(session: &'a mut SessionState, code: &str) -> Self {
        session.pending_code = Some(code.to_string());
        Self { session }
    }
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        self.session.pending_code = None;
    }
}
