#![doc = include_str!("../README.md")]

mod album;
mod artist;
mod auth;
mod summary;
mod track;
mod utils;

pub use album::*;
pub use artist::*;
pub use auth::*;
pub use summary::*;
pub use track::*;
pub use utils::*;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use strum_macros::{AsRefStr, EnumString};

pub(crate) static SPOTIFY_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
pub(crate) static SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Errors that can occur when using the spotirs library.
///
/// Every variant displays as a human readable message. Request failures are
/// prefixed with the operation that failed, e.g.
/// `"Failed to get top tracks: Bad Request"`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required credential was missing or empty
    #[error("Missing required authentication credentials: {0}")]
    Configuration(String),
    /// Operation parameters were rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Exchanging the refresh token for an access token failed
    #[error("Failed to get access token: {0}")]
    AuthExchange(String),
    /// An authorized Web API request failed
    #[error("Failed to get {operation}: {message}")]
    Request {
        /// The operation that failed
        operation: Operation,
        /// Status text or transport error message
        message: String,
    },
    /// A response could not be shaped into the requested type
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn request(operation: Operation, cause: impl Display) -> Self {
        Error::Request {
            operation,
            message: cause.to_string(),
        }
    }
}

/// Invalid parameters for a Web API operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Time range is not one of `short_term`, `medium_term` or `long_term`
    #[error("Invalid time range: {0}. Must be 'short_term', 'medium_term', or 'long_term'")]
    TimeRange(String),
    /// Limit is outside the accepted range
    #[error("Invalid limit: {limit}. Must be between {min} and {max}")]
    Limit { limit: i64, min: i64, max: i64 },
}

/// The Web API operations offered by [`SpotifyClient`].
///
/// The display form is the label used in [`Error::Request`] messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, strum_macros::Display)]
pub enum Operation {
    #[strum(serialize = "top tracks")]
    TopTracks,
    #[strum(serialize = "top artists")]
    TopArtists,
    #[strum(serialize = "recently played")]
    RecentlyPlayed,
}

/// Period over which top tracks and artists are calculated.
///
/// # Example
///
/// ```no_run
/// use spotirs::TimeRange;
///
/// let time_range: TimeRange = "long_term".parse().unwrap();
/// assert_eq!(time_range, TimeRange::LongTerm);
/// assert_eq!(TimeRange::ShortTerm.as_ref(), "short_term");
/// ```
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Default,
    EnumString,
    AsRefStr,
    strum_macros::Display,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeRange {
    /// Approximately the last 4 weeks
    ShortTerm,
    /// Approximately the last 6 months
    #[default]
    MediumTerm,
    /// Calculated from several years of data
    LongTerm,
}

/// Client for the listening statistics endpoints of the Spotify Web API.
///
/// Every operation exchanges the configured refresh token for a new access
/// token and then performs the request with it. No token is kept between
/// calls, so a client can be shared freely between concurrent tasks.
///
/// # Example
///
/// ```no_run
/// use spotirs::{Credentials, SpotifyClient, TimeRange};
///
/// # async fn example() -> Result<(), spotirs::Error> {
/// let client = SpotifyClient::new(Credentials::from_env()?);
///
/// let tracks = client.top_tracks(TimeRange::ShortTerm, 10).await?;
/// println!("{}", serde_json::to_string_pretty(&tracks)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: reqwest::Client,
    auth: SpotifyAuth,
    api_base_url: String,
}

impl SpotifyClient {
    /// Create a new SpotifyClient from validated credentials.
    pub fn new(credentials: Credentials) -> Self {
        let client = reqwest::Client::new();
        Self {
            auth: SpotifyAuth::new(credentials).with_client(client.clone()),
            client,
            api_base_url: SPOTIFY_API_BASE_URL.to_string(),
        }
    }

    /// Create a new SpotifyClient from possibly missing credential values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if any value is `None` or empty.
    pub fn create(
        client_id: Option<&str>,
        client_secret: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Result<Self, Error> {
        let client_id = client_id.ok_or_else(|| Error::Configuration("client_id".into()))?;
        let client_secret =
            client_secret.ok_or_else(|| Error::Configuration("client_secret".into()))?;
        let refresh_token =
            refresh_token.ok_or_else(|| Error::Configuration("refresh_token".into()))?;

        Ok(Self::new(Credentials::new(
            client_id,
            client_secret,
            refresh_token,
        )?))
    }

    /// Set a custom HTTP client using the builder pattern.
    ///
    /// The client is used for both the token exchange and the API requests.
    /// This is where timeouts, proxies or default headers are configured.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use spotirs::{Credentials, SpotifyClient};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let custom_client = reqwest::Client::builder()
    ///     .timeout(std::time::Duration::from_secs(10))
    ///     .build()?;
    ///
    /// let client = SpotifyClient::new(Credentials::from_env()?).with_client(custom_client);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.auth = self.auth.with_client(client.clone());
        self.client = client;
        self
    }

    /// Set the Web API base URL using the builder pattern.
    ///
    /// Defaults to `https://api.spotify.com/v1`.
    pub fn with_api_base_url(mut self, api_base_url: &str) -> Self {
        self.api_base_url = api_base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the accounts service base URL using the builder pattern.
    ///
    /// Defaults to `https://accounts.spotify.com`; tokens are requested from
    /// `{accounts_base_url}/api/token`.
    pub fn with_accounts_base_url(mut self, accounts_base_url: &str) -> Self {
        self.auth = self.auth.with_accounts_base_url(accounts_base_url);
        self
    }

    pub fn get_api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn get_token_url(&self) -> &str {
        self.auth.get_token_url()
    }

    pub fn credentials(&self) -> &Credentials {
        self.auth.credentials()
    }

    /// Fetch a fresh access token.
    ///
    /// This is done automatically by every operation; it is exposed for
    /// callers that want to issue their own requests.
    pub async fn get_access_token(&self) -> Result<String, Error> {
        self.auth.get_access_token().await
    }

    // Authorize and perform a GET request, returning the JSON body as is.
    pub(crate) async fn do_request(
        &self,
        operation: Operation,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, Error> {
        let access_token = self.auth.get_access_token().await?;

        let url = build_url_with_params(&format!("{}{path}", self.api_base_url), params)
            .map_err(|e| Error::request(operation, e))?;
        let headers = create_auth_headers(&access_token).map_err(|e| Error::request(operation, e))?;

        let resp = self
            .client
            .get(url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| Error::request(operation, error_chain(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            let err = Error::request(operation, status_text(status));
            if log::log_enabled!(log::Level::Debug) {
                log::debug!("Requested URL: {}", url);
                log::debug!("Spotify API Error: {}", err);
            }
            return Err(err);
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::request(operation, error_chain(&e)))?;

        // If it's an empty body, just encode a null value
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|e| Error::request(operation, e))?
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(pretty_value) = serde_json::to_string_pretty(&value) {
                log::trace!("Requested URL: {}", url);
                log::trace!("Response {}", pretty_value);
            }
        }

        Ok(value)
    }
}

// Display an error followed by each of its sources, e.g.
// `error sending request for url (..): client error (Connect): Connection refused`
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

// Reason phrase for a status, falling back to the numeric code.
pub(crate) fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => status.as_str().to_string(),
    }
}

/// A single page of results from the Spotify Web API.
///
/// # Example
///
/// ```no_run
/// use spotirs::{Paging, SpotifyClient, TimeRange, TopTrack};
///
/// # async fn example(client: SpotifyClient) -> Result<(), spotirs::Error> {
/// let raw = client.top_tracks(TimeRange::MediumTerm, 20).await?;
/// let page: Paging<TopTrack> = serde_json::from_value(raw)?;
///
/// println!("Showing {} of {} tracks", page.items.len(), page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    /// Items in the current page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total number of items available
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub total: u32,
    /// Maximum number of items per page
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub limit: u32,
    /// Offset of the current page
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub offset: u32,
    /// Link to the current page
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub href: String,
    /// Link to the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Paging<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit: 0,
            offset: 0,
            href: String::new(),
            next: None,
            previous: None,
        }
    }
}

/// Cover art or profile picture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Image {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub url: String,
    /// Height in pixels, if known
    #[serde(default)]
    pub height: Option<u32>,
    /// Width in pixels, if known
    #[serde(default)]
    pub width: Option<u32>,
}

/// Links to the Spotify web player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExternalUrls {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub spotify: String,
}

// Utility function to deserialize a null value as a default value
pub(crate) fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
