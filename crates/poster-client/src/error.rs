use thiserror::Error;

/// Failures while talking to the metadata service.
///
/// These never escape `fetch_poster`; they decide whether an attempt is
/// retried and which placeholder is returned.
#[derive(Error, Debug)]
pub enum PosterClientError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Metadata service returned status {status}")]
    Status { status: u16 },

    #[error("Invalid response from metadata service: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl PosterClientError {
    /// Connection failures and timeouts are worth another attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for PosterClientError {
    fn from(err: reqwest::Error) -> Self {
        // Timeout first: a connect timeout also reports is_connect()
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PosterClientError>;
