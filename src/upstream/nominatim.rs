//! Nominatim Client
//!
//! Reverse geocoding against a Nominatim-compatible HTTP endpoint.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::types::LocalityResult;
use crate::upstream::LocalityFetcher;

/// Address fields tried in order when naming a locality.
const LOCALITY_FIELDS: &[&str] = &[
    "city",
    "town",
    "village",
    "hamlet",
    "municipality",
    "suburb",
    "county",
    "state",
];

// == Nominatim Client ==
/// HTTP client for `GET {base_url}/reverse`.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    zoom: u8,
    accept_language: Option<String>,
}

impl NominatimClient {
    // == Constructor ==
    /// Builds a client with the given User-Agent and request timeout.
    ///
    /// The public Nominatim usage policy rejects requests without an
    /// identifying User-Agent.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            zoom: 10,
            accept_language: None,
        })
    }

    /// Builds a client from service configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(
            &config.upstream_url,
            &config.user_agent,
            config.upstream_timeout(),
        )?
        .with_zoom(config.zoom);
        if let Some(language) = &config.accept_language {
            client = client.with_accept_language(language);
        }
        Ok(client)
    }

    /// Sets the detail level of the returned address (10 = city, 18 = building).
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom.min(18);
        self
    }

    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = Some(language.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LocalityFetcher for NominatimClient {
    async fn fetch_locality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<LocalityResult>> {
        let url = format!("{}/reverse", self.base_url);
        let query = [
            ("format", "jsonv2".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("zoom", self.zoom.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        let mut request = self.client.get(&url).query(&query);
        if let Some(language) = &self.accept_language {
            request = request.header(ACCEPT_LANGUAGE, language.as_str());
        }

        debug!("Upstream request: {} lat={} lon={}", url, latitude, longitude);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Network(format!(
                "upstream returned HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        parse_reverse_body(&body)
    }
}

// == Response Parsing ==
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    lat: Option<Value>,
    #[serde(default)]
    lon: Option<Value>,
    #[serde(default)]
    address: HashMap<String, Value>,
}

/// Parses a reverse geocoding response body.
///
/// Returns `Ok(None)` for the service's "no match" answers (an `error`
/// object, `null` or an empty array) and `CacheError::Parse` when a place
/// object lacks its name or coordinates.
pub fn parse_reverse_body(body: &str) -> Result<Option<LocalityResult>> {
    let value: Value = serde_json::from_str(body)?;

    match &value {
        Value::Null => return Ok(None),
        Value::Array(items) if items.is_empty() => return Ok(None),
        Value::Object(_) => {}
        other => {
            return Err(CacheError::Parse(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            )))
        }
    }

    let response: ReverseResponse = serde_json::from_value(value)?;
    if let Some(reason) = response.error {
        debug!("Upstream reported no match: {}", reason);
        return Ok(None);
    }

    let full_name = response
        .display_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| CacheError::Parse("missing display_name".to_string()))?;
    let latitude = response
        .lat
        .as_ref()
        .and_then(coordinate)
        .ok_or_else(|| CacheError::Parse("missing or invalid lat".to_string()))?;
    let longitude = response
        .lon
        .as_ref()
        .and_then(coordinate)
        .ok_or_else(|| CacheError::Parse("missing or invalid lon".to_string()))?;

    let display_name = LOCALITY_FIELDS
        .iter()
        .filter_map(|field| response.address.get(*field).and_then(Value::as_str))
        .find(|name| !name.trim().is_empty())
        .map(str::to_string)
        .unwrap_or(full_name);

    Ok(Some(LocalityResult::new(display_name, latitude, longitude)))
}

/// Nominatim sends coordinates as strings; accept numbers too.
fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
