use std::time::Duration;

use reqwest::StatusCode;

/// Boxed cause of a transport failure (a `reqwest::Error` or an `io::Error`
/// raised while reading the body).
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("range request for prefix {prefix} failed: {source}")]
    Transport {
        prefix: String,
        #[source]
        source: TransportSource,
    },

    #[error("too many requests, retry in {retry_in} seconds")]
    RateLimited { retry_in: u64 },

    #[error("expected status OK (200), got {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("malformed range response: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("digest of {len} bytes is too short to derive a 5-character range prefix")]
    DigestTooShort { len: usize },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// The server answered, but not in the range API's wire format.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("retry-after header {value:?} is not a whole number of seconds")]
    RetryAfter { value: String },

    #[error("count {value:?} for suffix {suffix} is not a non-negative integer")]
    Count { suffix: String, value: String },

    #[error("range body is not valid UTF-8")]
    Encoding,
}

impl Error {
    pub(crate) fn transport(prefix: &str, source: impl Into<TransportSource>) -> Self {
        Error::Transport { prefix: prefix.to_string(), source: source.into() }
    }

    /// How long the server asked us to wait, if this is a rate-limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimited { retry_in } => Some(Duration::from_secs(*retry_in)),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}
