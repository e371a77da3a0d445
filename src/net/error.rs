use thiserror::Error;

/// Everything that can go wrong while fetching from the network.
///
/// None of these reach the user: callers log them and keep whatever
/// state they had before. The type is `Clone` so it can ride inside
/// an iced `Message`, which is why sources are flattened to strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The URL string could not be parsed
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connectivity, DNS, TLS, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived with no body at all
    #[error("response body was empty")]
    EmptyBody,

    /// The body did not match the expected schema
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
