use std::{path::PathBuf, sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    dashboard::{export::write_csv, fetch_track_records},
    error,
    management::TokenCache,
    spotify::SpotifyClient,
    success,
    types::{TimeRange, TrackRecord, TrackTableRow},
    warning,
};

/// Prints the top tracks of `time_range` and optionally writes them as CSV.
///
/// Runs on the token cached by `sporldash serve --cache-token`; there is no
/// way to log in from the terminal.
pub async fn tracks(time_range: TimeRange, csv: Option<PathBuf>) {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Missing configuration: {}", e),
    };

    let cache = TokenCache::default();
    let token = match cache.load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run sporldash serve --cache-token and log in.\n Error: {}",
            e
        ),
    };
    if token.is_expired() {
        error!("The cached token has expired. Please log in again through sporldash serve --cache-token.");
    }

    let client = SpotifyClient::new(Arc::new(config));

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching top tracks ({})...", time_range));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let records = match fetch_track_records(&client, &token, time_range).await {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch top tracks: {}", e);
        }
    };
    pb.finish_and_clear();

    if records.is_empty() {
        warning!("Spotify has no top tracks for you in {}.", time_range);
        return;
    }

    println!("{}", Table::new(table_rows(&records)));

    if let Some(path) = csv {
        match write_csv(&path, &records).await {
            Ok(()) => success!("Wrote {} tracks to {}", records.len(), path.display()),
            Err(e) => error!("Failed to write {}: {}", path.display(), e),
        }
    }
}

pub fn table_rows(records: &[TrackRecord]) -> Vec<TrackTableRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| TrackTableRow {
            rank: i + 1,
            name: r.name.clone(),
            artist: r.artist.clone(),
            album: r.album.clone(),
            release_year: r.release_year,
            popularity: r.popularity,
        })
        .collect()
}
