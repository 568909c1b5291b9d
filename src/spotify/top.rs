use std::future::Future;

use serde::de::DeserializeOwned;

use crate::{
    spotify::SpotifyClient,
    types::{TimeRange, Token, TopArtist, TopArtistsResponse, TopTrack, TopTracksResponse},
};

/// Number of tracks shown on the dashboard and written to the CSV.
pub const TOP_TRACKS_LIMIT: u32 = 10;

/// Number of artists whose genres feed the genre distribution.
pub const TOP_ARTISTS_LIMIT: u32 = 20;

/// Source of the current user's top items.
pub trait TopItemsSource {
    fn top_tracks(
        &self,
        token: &Token,
        time_range: TimeRange,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<TopTrack>, reqwest::Error>> + Send;

    fn top_artists(
        &self,
        token: &Token,
        time_range: TimeRange,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<TopArtist>, reqwest::Error>> + Send;
}

impl SpotifyClient {
    async fn get_top<T: DeserializeOwned>(
        &self,
        kind: &str,
        token: &Token,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<T, reqwest::Error> {
        let api_url = format!(
            "{uri}/me/top/{kind}",
            uri = &self.config().api_url,
            kind = kind
        );

        self.http()
            .get(&api_url)
            .bearer_auth(&token.access_token)
            .query(&[
                ("time_range", time_range.as_str().to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }
}

impl TopItemsSource for SpotifyClient {
    /// `GET /me/top/tracks?time_range=..&limit=..`
    async fn top_tracks(
        &self,
        token: &Token,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<TopTrack>, reqwest::Error> {
        let res: TopTracksResponse = self.get_top("tracks", token, time_range, limit).await?;
        Ok(res.items)
    }

    /// `GET /me/top/artists?time_range=..&limit=..`
    async fn top_artists(
        &self,
        token: &Token,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<TopArtist>, reqwest::Error> {
        let res: TopArtistsResponse = self.get_top("artists", token, time_range, limit).await?;
        Ok(res.items)
    }
}
