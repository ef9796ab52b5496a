//! HTTP client for the geocode.maps.co forward-geocoding API.
//!
//! Wraps `reqwest` with API-key management and typed response
//! deserialization. One GET per lookup, first match wins, no retry and no
//! caching — a miss or failure just means the caller falls back.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::error::GeocodeError;
use crate::types::GeoPoint;

const DEFAULT_BASE_URL: &str = "https://geocode.maps.co";

/// Client for the maps.co `search` endpoint.
///
/// Use [`GeocodeClient::new`] for production or
/// [`GeocodeClient::with_base_url`] to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

/// One entry of the maps.co search response. Coordinates usually arrive as
/// strings, occasionally as numbers.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: Value,
    lon: Value,
}

impl GeocodeClient {
    /// Creates a client pointed at the production geocoding service.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Forward-geocodes a free-text location and returns the first match,
    /// or `None` when the service has no match (or its coordinates are
    /// unparseable).
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::Deserialize`] if the body is not a JSON array of
    ///   result objects.
    pub async fn search_first(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        let mut url = self.base_url.clone();
        url.set_path("search");
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("api_key", &self.api_key);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let hits: Vec<SearchHit> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        Ok(hits.first().and_then(Self::hit_point))
    }

    /// Parses a hit's coordinates; unparseable values count as no match.
    fn hit_point(hit: &SearchHit) -> Option<GeoPoint> {
        let lat = coord(&hit.lat)?;
        let lng = coord(&hit.lon)?;
        Some(GeoPoint { lat, lng })
    }
}

fn coord(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
