use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode response at `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TmdbError {
    /// HTTP status of a non-success API response, if that is what this is.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TmdbError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether the server answered, just not with a success status.
    pub fn is_api(&self) -> bool {
        matches!(self, TmdbError::Api { .. })
    }
}
