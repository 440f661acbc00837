//! Shared HTTP error mapping.

use dealfinder_core::error::DealfinderError;
use reqwest::StatusCode;

/// Maps a transport-level failure (connect, timeout, body read) onto the
/// shared taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> DealfinderError {
    DealfinderError::network(err.to_string())
}

/// Maps a non-success HTTP status onto the shared taxonomy.
pub(crate) fn status_error(status: StatusCode) -> DealfinderError {
    DealfinderError::server(status.as_u16())
}

/// Maps a body that arrived but did not match the expected shape.
pub(crate) fn parse_error(context: &str, err: reqwest::Error) -> DealfinderError {
    DealfinderError::Serialization {
        format: "JSON".to_string(),
        message: format!("{context}: {err}"),
    }
}
