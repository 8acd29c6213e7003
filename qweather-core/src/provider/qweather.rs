use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::{
    Config,
    error::{Error, Result},
    model::{CityLookupResponse, CityRecord, WeatherReport},
};

use super::WeatherSource;

const CITY_LOOKUP: &str = "city lookup";
const WEATHER_NOW: &str = "weather now";

/// HTTP-backed [`WeatherSource`] talking to the QWeather v2/v7 endpoints.
///
/// Both endpoints share one request shape (`key` + `location` query
/// parameters, gzip-encoded JSON body) and one response protocol (HTTP
/// status, then an application `code` inside the payload), so the transport
/// handling lives in a single path.
#[derive(Debug, Clone)]
pub struct QWeatherProvider {
    api_key: String,
    geo_api_base: String,
    weather_api_base: String,
    http: Client,
}

impl QWeatherProvider {
    /// Build the provider from explicit config. The client carries the
    /// configured timeout so a stalled upstream settles as an error instead
    /// of hanging the reply forever.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            geo_api_base: config.geo_api_base.clone(),
            weather_api_base: config.weather_api_base.clone(),
            http,
        })
    }

    async fn get_json(&self, endpoint: &'static str, url: &str, location: &str) -> Result<Value> {
        tracing::debug!(endpoint, location, "sending request");

        let res = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("location", location)])
            .send()
            .await
            .map_err(|source| Error::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Transport { endpoint, source })?;

        decode_body(endpoint, status, &body)
    }
}

#[async_trait]
impl WeatherSource for QWeatherProvider {
    async fn lookup_city(&self, query: &str) -> Result<CityRecord> {
        let url = format!("{}/v2/city/lookup", self.geo_api_base);
        let payload = self.get_json(CITY_LOOKUP, &url, query).await?;
        let parsed = decode_lookup(payload)?;

        parsed
            .location
            .into_iter()
            .next()
            .ok_or_else(|| Error::CityNotFound { query: query.to_string() })
    }

    async fn current_weather(&self, city_id: &str) -> Result<WeatherReport> {
        let url = format!("{}/v7/weather/now", self.weather_api_base);
        let payload = self.get_json(WEATHER_NOW, &url, city_id).await?;
        decode_report(payload)
    }
}

/// HTTP-level check plus JSON decode, shared by both endpoints. Any non-200
/// status is an explicit failure.
fn decode_body(endpoint: &'static str, status: StatusCode, body: &str) -> Result<Value> {
    if !status.is_success() {
        return Err(Error::Status { endpoint, status, body: truncate_body(body) });
    }

    serde_json::from_str(body).map_err(|source| Error::Decode { endpoint, source })
}

/// Decode the lookup body and gate on its application code. The code gate
/// runs on the typed struct, which accepts `code` as string or bare number;
/// on failure the raw payload travels inside the error for verbatim
/// surfacing.
fn decode_lookup(payload: Value) -> Result<CityLookupResponse> {
    let parsed: CityLookupResponse = serde_json::from_value(payload.clone())
        .map_err(|source| Error::Decode { endpoint: CITY_LOOKUP, source })?;

    if parsed.is_success() {
        Ok(parsed)
    } else {
        Err(Error::Upstream { code: parsed.code, payload })
    }
}

/// Same gate for the weather body; a passing report keeps the verbatim
/// payload attached so downstream passthrough stays lossless.
fn decode_report(payload: Value) -> Result<WeatherReport> {
    let mut report: WeatherReport = serde_json::from_value(payload.clone())
        .map_err(|source| Error::Decode { endpoint: WEATHER_NOW, source })?;

    if !report.is_success() {
        return Err(Error::Upstream { code: report.code, payload });
    }

    report.raw = payload;
    Ok(report)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
