//! Station provider error types.

/// Errors from the station query provider.
///
/// Any of these fails the whole station search; there are no internal
/// retries and no partial results.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status code
    #[error("station API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response payload could not be parsed
    #[error("station payload parse error: {message}")]
    Payload { message: String },
}
