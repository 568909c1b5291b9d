use axum::{
    Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{dashboard::page, info, server::AppState, spotify::auth::authorize_url, warning};

/// Sends the browser to the provider's consent screen.
pub async fn login(Extension(app): Extension<AppState>) -> Response {
    let state = app.session.lock().await.begin_login();

    match authorize_url(app.client.config(), &state) {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(e) => {
            warning!("Cannot build authorization URL: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page::error_page(&e))).into_response()
        }
    }
}

pub async fn logout(Extension(app): Extension<AppState>) -> Redirect {
    app.session.lock().await.clear();
    if let Some(cache) = &app.token_cache {
        if let Err(e) = cache.clear().await {
            warning!("Failed to remove cached token: {}", e);
        }
    }

    info!("Logged out");
    Redirect::to("/")
}
