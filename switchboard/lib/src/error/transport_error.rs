use thiserror::Error;

/// Failures of the network exchange itself.
///
/// These are propagated unchanged by the runtime; they are never mapped onto
/// declared API errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The exchange did not finish within the transport's timeout.
    #[error("request timed out")]
    Timeout,

    /// The transport aborted the exchange on request.
    #[error("request was cancelled")]
    Cancelled,

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Any other failure reported by the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err)
        }
    }
}
