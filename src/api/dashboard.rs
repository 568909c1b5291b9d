use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    api::parse_time_range,
    dashboard::{Dashboard, page},
    management::{SessionState, TokenState, get_valid_token},
    server::AppState,
    warning,
};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub login: Option<String>,
    pub time_range: Option<String>,
}

const LOGIN_FAILED: &str = "failed";

/// Serves the dashboard and doubles as the OAuth redirect target.
///
/// A request carrying `code` is only ever answered with a redirect to a URL
/// without it, so reloading the page cannot replay the code.
pub async fn dashboard(
    Query(params): Query<DashboardParams>,
    Extension(app): Extension<AppState>,
) -> Response {
    let time_range = parse_time_range(params.time_range.as_deref());

    if let Some(error) = &params.error {
        warning!("Authorization was not granted: {}", error);
        return Html(page::login_page(Some(
            "Spotify authorization was cancelled. Log in to continue.",
        )))
        .into_response();
    }

    let mut session = app.session.lock().await;

    if let Some(code) = params.code.as_deref() {
        let code = accepted_code(&mut session, code, params.state.as_deref());
        let before = session.token().cloned();
        let token = get_valid_token(&mut session, code, &app.client).await;
        drop(session);

        let target = match &token {
            Some(t) => {
                if before.as_ref() != Some(t) {
                    app.remember(t).await;
                }
                format!("/?time_range={}", time_range)
            }
            None => format!("/?time_range={}&login={}", time_range, LOGIN_FAILED),
        };
        return Redirect::to(&target).into_response();
    }

    let Some(token) = get_valid_token(&mut session, None, &app.client).await else {
        let notice = match session.state() {
            TokenState::Expired => Some("Your session has expired. Please log in again."),
            _ if params.login.as_deref() == Some(LOGIN_FAILED) => {
                Some("Login failed. Please try again.")
            }
            _ => None,
        };
        return Html(page::login_page(notice)).into_response();
    };
    drop(session);

    match Dashboard::build(&app.client, &token, time_range).await {
        Ok(dashboard) => Html(page::dashboard_page(&dashboard)).into_response(),
        Err(e) if e.is_unauthorized() => {
            warning!("Spotify rejected the access token: {}", e);
            app.session.lock().await.clear();
            Html(page::login_page(Some(
                "Spotify no longer accepts your login. Please log in again.",
            )))
            .into_response()
        }
        Err(e) => {
            warning!("Dashboard render failed: {}", e);
            (StatusCode::BAD_GATEWAY, Html(page::error_page(&e.to_string()))).into_response()
        }
    }
}

/// Filters the callback code down to one that may be exchanged.
///
/// Codes already consumed by this session are passed through untouched (the
/// session ignores them). Fresh codes must come with the `state` issued by
/// `/login`.
fn accepted_code<'a>(
    session: &mut SessionState,
    code: &'a str,
    returned_state: Option<&str>,
) -> Option<&'a str> {
    if session.has_consumed(code) {
        return Some(code);
    }

    match session.verify_login_state(returned_state) {
        Ok(()) => Some(code),
        Err(e) => {
            warning!("Ignoring authorization code: {}", e);
            None
        }
    }
}
