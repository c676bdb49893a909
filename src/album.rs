use crate::ExternalUrls;
use crate::Image;
use crate::artist::SimplifiedArtist;
use crate::deserialize_null_default;
use serde::{Deserialize, Serialize};

/// An album as embedded in track objects returned by the Web API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SimplifiedAlbum {
    /// Spotify ID of the album
    #[serde(deserialize_with = "deserialize_null_default")]
    pub id: String,
    /// Album name
    #[serde(deserialize_with = "deserialize_null_default")]
    pub name: String,
    /// "album", "single" or "compilation"
    #[serde(deserialize_with = "deserialize_null_default")]
    pub album_type: String,
    /// Artists credited on the album
    #[serde(deserialize_with = "deserialize_null_default")]
    pub artists: Vec<SimplifiedArtist>,
    /// Markets the album is available in (ISO 3166-1 alpha-2 codes)
    #[serde(deserialize_with = "deserialize_null_default")]
    pub available_markets: Vec<String>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub external_urls: ExternalUrls,
    /// Web API endpoint for the full album
    #[serde(deserialize_with = "deserialize_null_default")]
    pub href: String,
    /// Cover art in various sizes, widest first
    #[serde(deserialize_with = "deserialize_null_default")]
    pub images: Vec<Image>,
    /// Whether the album is playable in the user's market
    pub is_playable: Option<bool>,
    /// Release date, precise to `release_date_precision`
    #[serde(deserialize_with = "deserialize_null_default")]
    pub release_date: String,
    /// "year", "month" or "day"
    #[serde(deserialize_with = "deserialize_null_default")]
    pub release_date_precision: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub total_tracks: u32,
    /// Spotify URI of the album
    #[serde(deserialize_with = "deserialize_null_default")]
    pub uri: String,
}

/// A simplified view of the album a track belongs to.
///
/// Artist objects are flattened to their names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AlbumSummary {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub images: Vec<Image>,
    /// Names of the album's artists
    pub artists: Vec<String>,
}

impl From<&SimplifiedAlbum> for AlbumSummary {
    fn from(album: &SimplifiedAlbum) -> Self {
        Self {
            id: album.id.clone(),
            name: album.name.clone(),
            uri: album.uri.clone(),
            release_date: album.release_date.clone(),
            total_tracks: album.total_tracks,
            images: album.images.clone(),
            artists: album.artists.iter().map(|a| a.name.clone()).collect(),
        }
    }
}

impl AlbumSummary {
    /// URL of the widest cover image, if any.
    pub fn cover_url(&self) -> Option<&str> {
        self.images
            .iter()
            .max_by_key(|image| image.width.unwrap_or(0))
            .map(|image| image.url.as_str())
    }
}
