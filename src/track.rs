use crate::Error;
use crate::ExternalUrls;
use crate::Operation;
use crate::Paging;
use crate::SpotifyClient;
use crate::album::{AlbumSummary, SimplifiedAlbum};
use crate::artist::SimplifiedArtist;
use crate::deserialize_null_default;
use crate::utils::{validate_limit, validate_time_range};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A track as returned by the top tracks and recently played endpoints.
///
/// Every field falls back to its default when missing from the payload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TopTrack {
    /// Spotify ID of the track
    #[serde(deserialize_with = "deserialize_null_default")]
    pub id: String,
    /// Track name
    #[serde(deserialize_with = "deserialize_null_default")]
    pub name: String,
    /// The album the track appears on
    #[serde(deserialize_with = "deserialize_null_default")]
    pub album: SimplifiedAlbum,
    /// Artists who performed the track
    #[serde(deserialize_with = "deserialize_null_default")]
    pub artists: Vec<SimplifiedArtist>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub available_markets: Vec<String>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub disc_number: u32,
    /// Track length in milliseconds
    #[serde(deserialize_with = "deserialize_null_default")]
    pub duration_ms: u64,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub explicit: bool,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub external_ids: ExternalIds,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub external_urls: ExternalUrls,
    /// Web API endpoint for the full track
    #[serde(deserialize_with = "deserialize_null_default")]
    pub href: String,
    /// Whether the track is from a local file
    #[serde(deserialize_with = "deserialize_null_default")]
    pub is_local: bool,
    pub is_playable: Option<bool>,
    /// Popularity between 0 and 100
    #[serde(deserialize_with = "deserialize_null_default")]
    pub popularity: u32,
    /// 30 second preview, if available
    pub preview_url: Option<String>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub track_number: u32,
    /// Spotify URI of the track
    #[serde(deserialize_with = "deserialize_null_default")]
    pub uri: String,
}

/// Known external identifiers for a track.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ExternalIds {
    /// International Standard Recording Code
    pub isrc: Option<String>,
}

/// A simplified view of a track.
///
/// Artists are flattened to their names and the album to an [`AlbumSummary`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub href: String,
    pub uri: String,
    /// Names of the performing artists
    pub artists: Vec<String>,
    pub album: AlbumSummary,
    pub popularity: u32,
}

/// Shape a track into its simplified view.
///
/// # Example
///
/// ```no_run
/// use spotirs::{TopTrack, format_track};
///
/// let raw: TopTrack = serde_json::from_value(serde_json::json!({
///     "id": "1",
///     "name": "Test Track",
///     "artists": [{ "name": "Test Artist" }],
/// }))
/// .unwrap();
///
/// let track = format_track(&raw);
/// assert_eq!(track.artists, vec!["Test Artist".to_string()]);
/// ```
pub fn format_track(track: &TopTrack) -> Track {
    Track {
        id: track.id.clone(),
        name: track.name.clone(),
        href: track.href.clone(),
        uri: track.uri.clone(),
        artists: track.artists.iter().map(|a| a.name.clone()).collect(),
        album: AlbumSummary::from(&track.album),
        popularity: track.popularity,
    }
}

/// The recently played page. It is cursor based rather than offset based.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RecentlyPlayed {
    #[serde(deserialize_with = "deserialize_null_default")]
    pub items: Vec<PlayHistory>,
    /// Link to the next page, if any
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub limit: u32,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub href: String,
}

/// One play of a track.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PlayHistory {
    #[serde(deserialize_with = "deserialize_null_default")]
    pub track: TopTrack,
    /// ISO 8601 timestamp of when the track was played
    #[serde(deserialize_with = "deserialize_null_default")]
    pub played_at: String,
    /// Playlist, album or artist the track was played from
    pub context: Option<PlayContext>,
}

/// Cursors used to page through the recently played history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Where a track was played from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PlayContext {
    /// "artist", "playlist" or "album"
    #[serde(rename = "type")]
    #[serde(deserialize_with = "deserialize_null_default")]
    pub context_type: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub external_urls: ExternalUrls,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub href: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub uri: String,
}

/// A simplified view of one recently played track.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct PlayedTrack {
    pub track: Track,
    pub played_at: String,
}

/// Shape a play history entry into its simplified view.
pub fn format_play_history(entry: &PlayHistory) -> PlayedTrack {
    PlayedTrack {
        track: format_track(&entry.track),
        played_at: entry.played_at.clone(),
    }
}

impl SpotifyClient {
    /// Get the current user's top tracks.
    ///
    /// # Arguments
    ///
    /// * `time_range` - `short_term`, `medium_term` or `long_term`; a [`crate::TimeRange`]
    ///   works too
    /// * `limit` - Number of tracks to return, between 1 and 50
    ///
    /// # Returns
    ///
    /// The JSON page returned by the Web API, unmodified.
    ///
    /// # Errors
    ///
    /// Invalid parameters fail with [`Error::Validation`] before any request
    /// is made. Token exchange failures are [`Error::AuthExchange`], and a
    /// failed request is [`Error::Request`] for [`Operation::TopTracks`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: spotirs::SpotifyClient) -> Result<(), spotirs::Error> {
    /// let tracks = client.top_tracks(spotirs::TimeRange::ShortTerm, 20).await?;
    /// println!("{}", tracks["items"][0]["name"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn top_tracks(
        &self,
        time_range: impl AsRef<str>,
        limit: i64,
    ) -> Result<Value, Error> {
        let time_range = validate_time_range(time_range.as_ref())?;
        let limit = validate_limit(limit)?;

        let params = [
            ("time_range", time_range.as_ref().to_string()),
            ("limit", limit.to_string()),
        ];

        self.do_request(Operation::TopTracks, "/me/top/tracks", &params).await
    }

    /// Get the current user's top tracks as simplified [`Track`] views.
    ///
    /// Same parameters and errors as [`SpotifyClient::top_tracks`]; a payload
    /// that cannot be read as a page of tracks fails with [`Error::SerdeJson`].
    pub async fn top_tracks_formatted(
        &self,
        time_range: impl AsRef<str>,
        limit: i64,
    ) -> Result<Vec<Track>, Error> {
        let resp = self.top_tracks(time_range, limit).await?;
        let page: Paging<TopTrack> = serde_json::from_value(resp)?;

        Ok(page.items.iter().map(format_track).collect())
    }

    /// Get the tracks the current user played most recently.
    ///
    /// # Arguments
    ///
    /// * `limit` - Number of plays to return, between 1 and 50
    ///
    /// # Returns
    ///
    /// The JSON page returned by the Web API, unmodified.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: spotirs::SpotifyClient) -> Result<(), spotirs::Error> {
    /// let recent = client.recently_played(30).await?;
    /// if let Some(items) = recent["items"].as_array() {
    ///     for item in items {
    ///         println!("{} - played at {}", item["track"]["name"], item["played_at"]);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn recently_played(&self, limit: i64) -> Result<Value, Error> {
        let limit = validate_limit(limit)?;

        let params = [("limit", limit.to_string())];

        self.do_request(
            Operation::RecentlyPlayed,
            "/me/player/recently-played",
            &params,
        )
        .await
    }

    /// Get recently played tracks as simplified [`PlayedTrack`] views.
    pub async fn recently_played_formatted(&self, limit: i64) -> Result<Vec<PlayedTrack>, Error> {
        let resp = self.recently_played(limit).await?;
        let page: RecentlyPlayed = serde_json::from_value(resp)?;

        Ok(page.items.iter().map(format_play_history).collect())
    }
}
