use thiserror::Error;

/// Failure reported by the Spotify service or the HTTP layer in front of it.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// The access token was rejected or has expired.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested item does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests; the service asked us to back off.
    #[error("Rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    /// Any other non-success response from the Web API.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (connect, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// An identifier handed to the client was not understood.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SpotifyError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            SpotifyError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            SpotifyError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SpotifyError {
    fn from(err: serde_json::Error) -> Self {
        SpotifyError::Decode(format!("JSON error: {}", err))
    }
}
