use crate::Error;
use crate::SPOTIFY_ACCOUNTS_BASE_URL;
use crate::error_chain;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) static CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
pub(crate) static CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";
pub(crate) static REFRESH_TOKEN_ENV: &str = "SPOTIFY_REFRESH_TOKEN";

/// Application credentials and the user's refresh token.
///
/// All three values are checked to be non-empty when the credentials are
/// created and cannot be changed afterwards.
///
/// # Example
///
/// ```no_run
/// use spotirs::Credentials;
///
/// # fn example() -> Result<(), spotirs::Error> {
/// let credentials = Credentials::new("client_id", "client_secret", "refresh_token")?;
/// assert_eq!(credentials.client_id(), "client_id");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl Credentials {
    /// Create validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first empty field.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<Self, Error> {
        let credentials = Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        };

        if credentials.client_id.is_empty() {
            return Err(Error::Configuration("client_id".into()));
        }
        if credentials.client_secret.is_empty() {
            return Err(Error::Configuration("client_secret".into()));
        }
        if credentials.refresh_token.is_empty() {
            return Err(Error::Configuration("refresh_token".into()));
        }

        Ok(credentials)
    }

    /// Read credentials from `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and
    /// `SPOTIFY_REFRESH_TOKEN`.
    ///
    /// A `.env` file in the working directory (or any parent) is loaded first
    /// if one exists. Variables already set in the process environment win.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first variable that is
    /// missing or empty.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let read = |name: &str| -> Result<String, Error> {
            match std::env::var(name) {
                Ok(value) if !value.is_empty() => Ok(value),
                _ => Err(Error::Configuration(name.to_string())),
            }
        };

        Self::new(
            read(CLIENT_ID_ENV)?,
            read(CLIENT_SECRET_ENV)?,
            read(REFRESH_TOKEN_ENV)?,
        )
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// The base64 `client_id:client_secret` credential for these credentials.
    pub fn basic_auth_token(&self) -> String {
        basic_auth_token(&self.client_id, &self.client_secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Encode a client ID and secret as an HTTP Basic credential.
///
/// This is the standard, padded base64 encoding of `"{client_id}:{client_secret}"`.
///
/// # Example
///
/// ```no_run
/// assert_eq!(spotirs::basic_auth_token("id", "secret"), "aWQ6c2VjcmV0");
/// ```
pub fn basic_auth_token(client_id: &str, client_secret: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{client_id}:{client_secret}"))
}

/// Response from Spotify's token endpoint for a refresh token grant.
///
/// Only `access_token` is used by the client.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TokenResponse {
    /// Access token for API authentication
    pub access_token: String,
    /// Type of token (always "Bearer")
    #[serde(default)]
    pub token_type: String,
    /// Seconds until the access token expires
    #[serde(default)]
    pub expires_in: u64,
    /// Space separated list of granted scopes
    #[serde(default)]
    pub scope: String,
}

/// Exchanges a refresh token for short-lived access tokens.
///
/// Nothing is cached: every call to [`SpotifyAuth::get_access_token`] performs
/// a new exchange, so concurrent callers each receive their own token.
///
/// # Example
///
/// ```no_run
/// use spotirs::{Credentials, SpotifyAuth};
///
/// # async fn example() -> Result<(), spotirs::Error> {
/// let auth = SpotifyAuth::new(Credentials::new("client_id", "client_secret", "refresh_token")?);
/// let access_token = auth.get_access_token().await?;
/// println!("Access token: {access_token}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyAuth {
    client: reqwest::Client,
    credentials: Credentials,
    token_url: String,
}

impl SpotifyAuth {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            token_url: token_url(SPOTIFY_ACCOUNTS_BASE_URL),
        }
    }

    /// Set a custom HTTP client using the builder pattern.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Point the exchange at a different accounts service.
    ///
    /// The token endpoint is `{accounts_base_url}/api/token`.
    pub fn with_accounts_base_url(mut self, accounts_base_url: &str) -> Self {
        self.token_url = token_url(accounts_base_url);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The full URL of the token endpoint.
    pub fn get_token_url(&self) -> &str {
        &self.token_url
    }

    /// Base64 encoded `client_id:client_secret`.
    pub fn get_basic_auth_token(&self) -> String {
        self.credentials.basic_auth_token()
    }

    /// Fetch a fresh access token using the refresh token grant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthExchange`] if the request cannot be sent, the
    /// token endpoint answers with a non-success status, or the body is not
    /// a token response.
    pub async fn get_access_token(&self) -> Result<String, Error> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.credentials.refresh_token()),
        ];

        let resp = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", self.get_basic_auth_token()))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&params)
            .send()
            .await
            .map_err(|e| self.exchange_error(error_chain(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(self.exchange_error(format!(
                "Token request failed: {}",
                crate::status_text(status)
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| self.exchange_error(error_chain(&e)))?;

        log::trace!(
            "Received {} access token expiring in {}s",
            token.token_type,
            token.expires_in
        );

        Ok(token.access_token)
    }

    fn exchange_error(&self, cause: impl fmt::Display) -> Error {
        let err = Error::AuthExchange(cause.to_string());
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Requested URL: {}", self.token_url);
            log::debug!("{}", err);
        }
        err
    }
}

fn token_url(accounts_base_url: &str) -> String {
    format!("{}/api/token", accounts_base_url.trim_end_matches('/'))
}
