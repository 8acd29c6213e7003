use reqwest::StatusCode;

/// Failure modes of the lookup/fetch pipeline.
///
/// Callers get one of these instead of a success-shaped payload they would
/// have to sniff: transport and decode problems stay distinct from the
/// upstream saying "no" with its own application code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never completed (DNS, connection reset, timeout).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-200 HTTP status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The body was not the JSON shape the endpoint documents.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Geocoding succeeded but matched no city.
    #[error("no city found for '{query}'")]
    CityNotFound { query: String },

    /// HTTP 200, but the payload carries a non-success application code.
    /// The raw payload is retained so it can be surfaced verbatim.
    #[error("upstream replied with code {code}")]
    Upstream {
        code: String,
        payload: serde_json::Value,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
