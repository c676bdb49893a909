use crate::Error;
use crate::ExternalUrls;
use crate::Image;
use crate::Operation;
use crate::Paging;
use crate::SpotifyClient;
use crate::deserialize_null_default;
use crate::utils::{validate_limit, validate_time_range};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An artist as embedded in track and album objects.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SimplifiedArtist {
    /// Spotify ID of the artist
    #[serde(deserialize_with = "deserialize_null_default")]
    pub id: String,
    /// Artist name
    #[serde(deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub external_urls: ExternalUrls,
    /// Web API endpoint for the full artist
    #[serde(deserialize_with = "deserialize_null_default")]
    pub href: String,
    /// Spotify URI of the artist
    #[serde(deserialize_with = "deserialize_null_default")]
    pub uri: String,
}

/// Follower information for an artist.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Followers {
    /// Always null in current Web API responses
    pub href: Option<String>,
    /// Total number of followers
    #[serde(deserialize_with = "deserialize_null_default")]
    pub total: u64,
}

/// An artist as returned by the top artists endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TopArtist {
    #[serde(deserialize_with = "deserialize_null_default")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub external_urls: ExternalUrls,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub followers: Followers,
    /// Genres the artist is associated with, may be empty
    #[serde(deserialize_with = "deserialize_null_default")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub href: String,
    /// Profile pictures in various sizes, widest first
    #[serde(deserialize_with = "deserialize_null_default")]
    pub images: Vec<Image>,
    /// Popularity between 0 and 100, calculated from the popularity of the artist's tracks
    #[serde(deserialize_with = "deserialize_null_default")]
    pub popularity: u32,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub uri: String,
}

/// A simplified view of an artist.
///
/// The follower object is flattened to its total.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub href: String,
    pub uri: String,
    pub images: Vec<Image>,
    /// Total number of followers
    pub followers: u64,
}

/// Shape a top artist into its simplified view.
pub fn format_artist(artist: &TopArtist) -> Artist {
    Artist {
        id: artist.id.clone(),
        name: artist.name.clone(),
        href: artist.href.clone(),
        uri: artist.uri.clone(),
        images: artist.images.clone(),
        followers: artist.followers.total,
    }
}

impl SpotifyClient {
    /// Get the current user's top artists.
    ///
    /// # Arguments
    ///
    /// * `time_range` - `short_term`, `medium_term` or `long_term`; a [`crate::TimeRange`]
    ///   works too
    /// * `limit` - Number of artists to return, between 1 and 50
    ///
    /// # Returns
    ///
    /// The JSON page returned by the Web API, unmodified.
    ///
    /// # Errors
    ///
    /// Invalid parameters fail with [`Error::Validation`] before any request
    /// is made. Token exchange failures are [`Error::AuthExchange`], and a
    /// failed request is [`Error::Request`] for [`Operation::TopArtists`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example(client: spotirs::SpotifyClient) -> Result<(), spotirs::Error> {
    /// let artists = client.top_artists("long_term", 10).await?;
    /// println!("{}", artists["items"][0]["name"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn top_artists(
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

        self.do_request(Operation::TopArtists, "/me/top/artists", &params).await
    }

    /// Get the current user's top artists as simplified [`Artist`] views.
    ///
    /// Same parameters and errors as [`SpotifyClient::top_artists`]; a payload
    /// that cannot be read as a page of artists fails with [`Error::SerdeJson`].
    pub async fn top_artists_formatted(
        &self,
        time_range: impl AsRef<str>,
        limit: i64,
    ) -> Result<Vec<Artist>, Error> {
        let resp = self.top_artists(time_range, limit).await?;
        let page: Paging<TopArtist> = serde_json::from_value(resp)?;

        Ok(page.items.iter().map(format_artist).collect())
    }
}
