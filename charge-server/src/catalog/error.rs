//! Vehicle catalog error types.

/// Errors from the vehicle catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("catalog API error {status}: {message}")]
    Api { status: u16, message: String },

    /// GraphQL layer reported an error
    #[error("catalog query error: {message}")]
    Graphql { message: String },

    /// Response payload could not be parsed
    #[error("catalog payload parse error: {message}")]
    Payload { message: String },

    /// The requested vehicle does not exist in the catalog
    #[error("vehicle not found: {0}")]
    NotFound(String),
}
