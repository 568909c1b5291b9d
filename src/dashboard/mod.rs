//! # Dashboard Module
//!
//! Turns the user's top tracks and artists into everything the dashboard
//! page shows: the song records, the genre distribution, the release-year
//! histogram, the chart figures and the CSV export.
//!
//! Nothing in here is cached. A [`Dashboard`] is rebuilt from the API on
//! every render and dropped afterwards.

use std::{collections::HashMap, fmt};

use crate::{
    spotify::top::{TOP_ARTISTS_LIMIT, TOP_TRACKS_LIMIT, TopItemsSource},
    types::{GenreCount, TimeRange, Token, TopArtist, TopTrack, TrackRecord, YearBucket},
    utils,
};

pub mod charts;
pub mod export;
pub mod page;

/// How many genres the distribution chart keeps.
pub const TOP_GENRES: usize = 10;

#[derive(Debug)]
pub enum DashboardError {
    /// A request to the Web API failed or returned garbage.
    Upstream(reqwest::Error),
    /// A track's album carries a release date without a leading year.
    InvalidReleaseDate { track: String, release_date: String },
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Upstream(e) => write!(f, "Spotify API request failed: {}", e),
            DashboardError::InvalidReleaseDate {
                track,
                release_date,
            } => write!(
                f,
                "track '{}' has an unreadable release date '{}'",
                track, release_date
            ),
        }
    }
}

impl std::error::Error for DashboardError {}

impl DashboardError {
    /// True when the Web API refused the access token (revoked or expired
    /// early); the session has to log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            DashboardError::Upstream(e) if e.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
        )
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Upstream(err)
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub time_range: TimeRange,
    pub records: Vec<TrackRecord>,
    pub genres: Vec<GenreCount>,
    pub years: Vec<YearBucket>,
}

impl Dashboard {
    /// Fetches top tracks and top artists and derives all views from them.
    ///
    /// Two requests are made: tracks (limit 10) and artists (limit 20).
    pub async fn build<S: TopItemsSource>(
        source: &S,
        token: &Token,
        time_range: TimeRange,
    ) -> Result<Self, DashboardError> {
        let tracks = source
            .top_tracks(token, time_range, TOP_TRACKS_LIMIT)
            .await?;
        let artists = source
            .top_artists(token, time_range, TOP_ARTISTS_LIMIT)
            .await?;

        Self::from_items(time_range, &tracks, &artists)
    }

    pub fn from_items(
        time_range: TimeRange,
        tracks: &[TopTrack],
        artists: &[TopArtist],
    ) -> Result<Self, DashboardError> {
        let records = track_records(tracks)?;
        let years = release_year_histogram(&records);

        Ok(Self {
            time_range,
            genres: genre_distribution(artists, TOP_GENRES),
            records,
            years,
        })
    }
}

/// Fetches the top tracks and projects them onto display records.
///
/// Used by the CSV export, which needs no artists.
pub async fn fetch_track_records<S: TopItemsSource>(
    source: &S,
    token: &Token,
    time_range: TimeRange,
) -> Result<Vec<TrackRecord>, DashboardError> {
    let tracks = source
        .top_tracks(token, time_range, TOP_TRACKS_LIMIT)
        .await?;
    track_records(&tracks)
}

/// Projects API tracks onto display records, keeping the API order.
pub fn track_records(tracks: &[TopTrack]) -> Result<Vec<TrackRecord>, DashboardError> {
    tracks
        .iter()
        .map(|t| {
            let release_year = utils::parse_release_year(&t.album.release_date).ok_or_else(|| {
                DashboardError::InvalidReleaseDate {
                    track: t.name.clone(),
                    release_date: t.album.release_date.clone(),
                }
            })?;

            Ok(TrackRecord {
                name: t.name.clone(),
                artist: t
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                album: t.album.name.clone(),
                release_year,
                popularity: t.popularity,
            })
        })
        .collect()
}

/// Counts genres over all artists and keeps the `top_n` most frequent.
///
/// Sorted by count descending; equal counts keep the order in which the
/// genre was first seen.
pub fn genre_distribution(artists: &[TopArtist], top_n: usize) -> Vec<GenreCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for genre in artists.iter().flat_map(|a| a.genres.iter()) {
        let count = counts.entry(genre.as_str()).or_insert_with(|| {
            order.push(genre.as_str());
            0
        });
        *count += 1;
    }

    let mut genres: Vec<GenreCount> = order
        .into_iter()
        .map(|g| GenreCount {
            genre: g.to_string(),
            count: counts[g],
        })
        .collect();

    // stable sort keeps first-seen order for ties
    genres.sort_by(|a, b| b.count.cmp(&a.count));
    genres.truncate(top_n);
    genres
}

/// One bucket per distinct release year, oldest first.
pub fn release_year_histogram(records: &[TrackRecord]) -> Vec<YearBucket> {
    let mut buckets: Vec<YearBucket> = Vec::new();
    for record in records {
        match buckets.iter().position(|b| b.year == record.release_year) {
            Some(i) => buckets[i].count += 1,
            None => buckets.push(YearBucket {
                year: record.release_year,
                count: 1,
            }),
        }
    }

    buckets.sort_by_key(|b| b.year);
    buckets
}
