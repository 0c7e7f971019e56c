use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    // The archive answers bad parameters with `{"error": true, "reason": "..."}`
    #[error("Archive rejected the request: {reason}")]
    Rejected { reason: String },

    #[error("Failed to parse archive response")]
    JsonParse(#[from] serde_json::Error),

    #[error("Archive response is missing '{0}'")]
    MissingField(&'static str),

    #[error("Archive returned {dates} dates but {temperatures} temperatures")]
    LengthMismatch { dates: usize, temperatures: usize },

    #[error("Archive returned an unparseable date '{value}'")]
    UnparseableDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl WeatherDataError {
    /// Whether the archive could not look up data for the requested window,
    /// as opposed to a transport or decoding failure.
    ///
    /// Only these failures are reported back to callers as an invalid date.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            WeatherDataError::Rejected { .. } | WeatherDataError::MissingField(_)
        )
    }
}
