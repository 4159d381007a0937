//! Directions provider error types.

/// Errors from the directions provider.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("directions API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response payload could not be parsed
    #[error("directions payload parse error: {message}")]
    Payload { message: String },

    /// The response contained no usable route geometry
    #[error("directions response contained no route geometry")]
    EmptyRoute,
}
