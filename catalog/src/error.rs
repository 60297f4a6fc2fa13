//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when fetching the event catalog.
///
/// There is no retry path: a failed fetch simply leaves the caller with
/// whatever list it already had.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived.
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed as an event array.
    #[error("Catalog response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Catalog returned a non-success status.
    #[error("Catalog error (status {status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },
}
