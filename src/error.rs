use thiserror::Error;

/// Every way a call to the remote API can fail.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was obtained: connect failure, dropped connection, unreadable body.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The server answered 2xx but the body is not the JSON we expected.
    #[error("fail to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("fail to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("fail to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
