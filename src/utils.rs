use crate::{TimeRange, ValidationError};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue};
use std::str::FromStr;
use url::Url;

/// Smallest `limit` accepted by the top items and recently played endpoints.
pub const MIN_LIMIT: i64 = 1;

/// Largest `limit` accepted by the top items and recently played endpoints.
pub const MAX_LIMIT: i64 = 50;

/// Check whether a string is one of the time ranges Spotify accepts.
///
/// Only the exact, lowercase forms are valid.
///
/// # Example
///
/// ```no_run
/// use spotirs::is_valid_time_range;
///
/// assert!(is_valid_time_range("short_term"));
/// assert!(!is_valid_time_range("Short_Term"));
/// assert!(!is_valid_time_range(""));
/// ```
pub fn is_valid_time_range(time_range: &str) -> bool {
    TimeRange::from_str(time_range).is_ok()
}

/// Check whether `limit` is an integer within the default `[1, 50]` range.
pub fn is_valid_limit(limit: f64) -> bool {
    is_valid_limit_in(limit, MIN_LIMIT as f64, MAX_LIMIT as f64)
}

/// Check whether `limit` is an integer within the inclusive `[min, max]` range.
///
/// Fractional values, NaN and infinities are never valid, whatever the bounds.
pub fn is_valid_limit_in(limit: f64, min: f64, max: f64) -> bool {
    limit.is_finite() && limit.fract() == 0.0 && limit >= min && limit <= max
}

pub(crate) fn validate_time_range(time_range: &str) -> Result<TimeRange, ValidationError> {
    TimeRange::from_str(time_range).map_err(|_| ValidationError::TimeRange(time_range.to_string()))
}

pub(crate) fn validate_limit(limit: i64) -> Result<i64, ValidationError> {
    if is_valid_limit(limit as f64) {
        Ok(limit)
    } else {
        Err(ValidationError::Limit {
            limit,
            min: MIN_LIMIT,
            max: MAX_LIMIT,
        })
    }
}

/// Append query parameters to `base_url`, form-encoding keys and values.
///
/// Parameters are appended after any query the base URL already carries.
///
/// # Example
///
/// ```no_run
/// use spotirs::build_url_with_params;
///
/// let url = build_url_with_params(
///     "https://api.spotify.com/v1/me/top/tracks",
///     [("time_range", "short_term"), ("limit", "10")],
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://api.spotify.com/v1/me/top/tracks?time_range=short_term&limit=10"
/// );
/// ```
pub fn build_url_with_params<I, K, V>(base_url: &str, params: I) -> Result<Url, url::ParseError>
where
    I: IntoIterator,
    I::Item: std::borrow::Borrow<(K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Url::parse_with_params(base_url, params)
}

/// Build the headers that authorize a Web API request with a bearer token.
///
/// The resulting `Authorization` value is marked sensitive so it is not
/// printed by `Debug` implementations.
pub fn create_auth_headers(access_token: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {access_token}"))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
