//! Tests for the request helpers: validators, the basic auth encoder,
//! query string construction and authorization headers.

use base64::Engine;
use reqwest::header::AUTHORIZATION;
use spotirs::{
    TimeRange, basic_auth_token, build_url_with_params, create_auth_headers, is_valid_limit,
    is_valid_limit_in, is_valid_time_range,
};

fn decode(token: &str) -> String {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(token)
        .expect("basic auth token should be valid base64");
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_valid_time_ranges() {
    assert!(is_valid_time_range("short_term"));
    assert!(is_valid_time_range("medium_term"));
    assert!(is_valid_time_range("long_term"));
}

#[test]
fn test_invalid_time_ranges() {
    for time_range in [
        "",
        "invalid",
        "Short_Term",
        "SHORT_TERM",
        "short-term",
        " short_term",
        "long_term ",
        "ShortTerm",
    ] {
        assert!(
            !is_valid_time_range(time_range),
            "{time_range:?} should not be a valid time range"
        );
    }
}

#[test]
fn test_time_range_string_forms() {
    assert_eq!(TimeRange::ShortTerm.as_ref(), "short_term");
    assert_eq!(TimeRange::MediumTerm.to_string(), "medium_term");
    assert_eq!("long_term".parse::<TimeRange>().unwrap(), TimeRange::LongTerm);
    assert_eq!(TimeRange::default(), TimeRange::MediumTerm);
    assert_eq!(
        serde_json::to_string(&TimeRange::ShortTerm).unwrap(),
        "\"short_term\""
    );
}

#[test]
fn test_valid_limits() {
    assert!(is_valid_limit(1.0));
    assert!(is_valid_limit(10.0));
    assert!(is_valid_limit(50.0));
}

#[test]
fn test_invalid_limits() {
    assert!(!is_valid_limit(0.0));
    assert!(!is_valid_limit(-1.0));
    assert!(!is_valid_limit(51.0));
    assert!(!is_valid_limit(100.0));
    assert!(!is_valid_limit(1.5));
    assert!(!is_valid_limit(f64::NAN));
    assert!(!is_valid_limit(f64::INFINITY));
}

#[test]
fn test_limits_with_custom_bounds() {
    assert!(is_valid_limit_in(5.0, 5.0, 10.0));
    assert!(is_valid_limit_in(10.0, 5.0, 10.0));
    assert!(!is_valid_limit_in(4.0, 5.0, 10.0));
    assert!(!is_valid_limit_in(11.0, 5.0, 10.0));
    assert!(is_valid_limit_in(0.0, 0.0, 100.0));

    // Fractions are never valid, whatever the bounds
    assert!(!is_valid_limit_in(1.5, 0.0, 100.0));
    assert!(!is_valid_limit_in(1.5, f64::NEG_INFINITY, f64::INFINITY));
}

#[test]
fn test_basic_auth_token_decodes_to_credentials() {
    let token = basic_auth_token("test-client-id", "test-client-secret");

    assert_eq!(decode(&token), "test-client-id:test-client-secret");
    assert_eq!(basic_auth_token("id", "secret"), "aWQ6c2VjcmV0");
}

#[test]
fn test_basic_auth_token_is_deterministic() {
    let pairs = [
        ("a", "b"),
        ("client", "s3cr3t/+="),
        ("ünïcödé", "pässwörd"),
        ("with:colon", "secret"),
    ];

    for (client_id, client_secret) in pairs {
        let first = basic_auth_token(client_id, client_secret);
        let second = basic_auth_token(client_id, client_secret);

        assert_eq!(first, second);
        assert_eq!(decode(&first), format!("{client_id}:{client_secret}"));
    }
}

#[test]
fn test_basic_auth_token_differs_by_client_id() {
    assert_ne!(
        basic_auth_token("client-one", "secret"),
        basic_auth_token("client-two", "secret")
    );
}

#[test]
fn test_build_url_with_params() {
    let url = build_url_with_params(
        "https://api.spotify.com/v1/me/top/tracks",
        [("time_range", "short_term"), ("limit", "10")],
    )
    .unwrap();

    assert_eq!(
        url.as_str(),
        "https://api.spotify.com/v1/me/top/tracks?time_range=short_term&limit=10"
    );
}

#[test]
fn test_build_url_with_params_encodes_values() {
    let url = build_url_with_params(
        "https://api.spotify.com/v1/search",
        [("q", "daft punk & friends"), ("type", "artist,track")],
    )
    .unwrap();

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("q".to_string(), "daft punk & friends".to_string()),
            ("type".to_string(), "artist,track".to_string()),
        ]
    );
    assert!(url.as_str().contains("q=daft+punk+%26+friends"));
}

#[test]
fn test_build_url_with_params_keeps_existing_query() {
    let url =
        build_url_with_params("https://api.spotify.com/v1/me?market=US", [("limit", "5")]).unwrap();

    assert_eq!(url.as_str(), "https://api.spotify.com/v1/me?market=US&limit=5");
}

#[test]
fn test_build_url_with_params_invalid_base() {
    assert!(build_url_with_params("not a url", [("limit", "5")]).is_err());
}

#[test]
fn test_create_auth_headers() {
    let headers = create_auth_headers("mock-token").unwrap();

    let value = headers.get(AUTHORIZATION).unwrap();
    assert_eq!(value, "Bearer mock-token");
    assert!(value.is_sensitive());
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_create_auth_headers_rejects_invalid_token() {
    assert!(create_auth_headers("bad\ntoken").is_err());
}
