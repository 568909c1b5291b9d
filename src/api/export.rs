use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    api::parse_time_range,
    dashboard::{
        export::{CSV_FILE_NAME, to_csv},
        fetch_track_records, page,
    },
    management::get_valid_token,
    server::AppState,
    warning,
};

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    pub time_range: Option<String>,
}

/// `GET /export.csv` - the top tracks as a CSV download.
pub async fn export_csv(
    Query(params): Query<ExportParams>,
    Extension(app): Extension<AppState>,
) -> Response {
    let time_range = parse_time_range(params.time_range.as_deref());

    let token = {
        let mut session = app.session.lock().await;
        get_valid_token(&mut session, None, &app.client).await
    };
    let Some(token) = token else {
        return Redirect::to("/").into_response();
    };

    let csv = match fetch_track_records(&app.client, &token, time_range).await {
        Ok(records) => to_csv(&records).map_err(|e| e.to_string()),
        Err(e) if e.is_unauthorized() => {
            warning!("Spotify rejected the access token: {}", e);
            app.session.lock().await.clear();
            return Redirect::to("/").into_response();
        }
        Err(e) => Err(e.to_string()),
    };

    match csv {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warning!("CSV export failed: {}", e);
            (StatusCode::BAD_GATEWAY, Html(page::error_page(&e))).into_response()
        }
    }
}
