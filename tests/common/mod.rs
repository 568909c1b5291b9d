#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use sporldash::{
    spotify::auth::{AuthError, CodeExchanger},
    types::{Token, TopArtist, TopTrack, TrackAlbum, TrackArtist},
};

pub const GOOD_CODE: &str = "good-code";
pub const NOW: i64 = 1_700_000_000;

pub fn token(access_token: &str, expires_at: i64) -> Token {
    Token {
        access_token: access_token.to_string(),
        expires_at,
        refresh_token: Some("refresh".to_string()),
        scope: "user-top-read".to_string(),
    }
}

/// Accepts only [`GOOD_CODE`] and records every code it is asked to exchange.
pub struct FakeExchanger {
    calls: AtomicUsize,
    codes: Mutex<Vec<String>>,
    expires_at: i64,
}

impl FakeExchanger {
    pub fn new() -> Self {
        Self::expiring_at(NOW + 3600)
    }

    pub fn expiring_at(expires_at: i64) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            codes: Mutex::new(Vec::new()),
            expires_at,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

impl CodeExchanger for FakeExchanger {
    async fn exchange_code(&self, code: &str) -> Result<Token, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.codes.lock().unwrap().push(code.to_string());

        if code == GOOD_CODE {
            Ok(token("fresh-access", self.expires_at))
        } else {
            Err(AuthError::Rejected {
                status: 400,
                message: "Invalid authorization code".to_string(),
            })
        }
    }
}

/// Never answers, like a token endpoint that hangs until the client gives up.
pub struct HangingExchanger;

impl CodeExchanger for HangingExchanger {
    async fn exchange_code(&self, _code: &str) -> Result<Token, AuthError> {
        std::future::pending().await
    }
}

pub fn track(name: &str, artist: &str, album: &str, release_date: &str, popularity: u32) -> TopTrack {
    TopTrack {
        name: name.to_string(),
        popularity,
        artists: vec![TrackArtist {
            name: artist.to_string(),
        }],
        album: TrackAlbum {
            name: album.to_string(),
            release_date: release_date.to_string(),
        },
    }
}

pub fn artist(name: &str, genres: &[&str]) -> TopArtist {
    TopArtist {
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        popularity: 50,
    }
}

/// The Web API's `/me/top/tracks` body with ten tracks, popularity 80, 75, ...
pub fn top_tracks_json() -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..10)
        .map(|i| {
            serde_json::json!({
                "id": format!("track{}", i),
                "name": format!("Song {}", i + 1),
                "popularity": 80 - 5 * i,
                "uri": format!("spotify:track:track{}", i),
                "artists": [
                    { "id": format!("artist{}", i), "name": format!("Artist {}", i + 1) },
                    { "id": "feat", "name": "Featured" }
                ],
                "album": {
                    "id": format!("album{}", i),
                    "name": format!("Album {}", i + 1),
                    "release_date": match i % 3 {
                        0 => format!("20{:02}-03-14", 10 + i),
                        1 => format!("19{:02}", 90 + i),
                        _ => format!("20{:02}-11", 10 + i),
                    },
                    "release_date_precision": "day"
                }
            })
        })
        .collect();

    serde_json::json!({ "items": items, "total": 50, "limit": 10, "offset": 0 })
}

pub fn top_artists_json() -> serde_json::Value {
    serde_json::json!({
        "items": [
            { "id": "a1", "name": "Artist 1", "popularity": 70, "genres": ["indie pop", "dream pop"] },
            { "id": "a2", "name": "Artist 2", "popularity": 60, "genres": ["dream pop", "shoegaze"] },
            { "id": "a3", "name": "Artist 3", "popularity": 50, "genres": [] },
            { "id": "a4", "name": "Artist 4", "popularity": 40, "genres": ["indie pop", "dream pop"] }
        ]
    })
}
