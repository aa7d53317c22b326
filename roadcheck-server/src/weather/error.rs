//! Weather gateway error types.

/// Errors from a weather lookup.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check METEOSTAT_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by Meteostat")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No weather station is configured or could be discovered
    #[error("no weather stations available")]
    NoStations,

    /// The caller asked for something impossible (e.g. hour 24)
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
