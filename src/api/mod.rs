//! Graylog REST API access.
//!
//! One typed document per endpoint, fetched with basic authentication.

mod client;
mod models;

#[cfg(test)]
pub(crate) mod mock;

pub use client::*;
pub use models::*;

use crate::check::Severity;

use thiserror::Error;

/// API query errors.
///
/// The display text is what ends up in the status line; the wrapped
/// source is only logged.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cannot build HTTP client.")]
    Client(#[source] reqwest::Error),
    #[error("Cannot connect to Graylog API")]
    Connect(#[source] reqwest::Error),
    #[error("No response received from Graylog API")]
    Read(#[source] reqwest::Error),
    #[error("Cannot parse JSON from Graylog API")]
    Json(#[source] serde_json::Error),
    #[error("Graylog API replied with HTTP code {0}")]
    Status(u16),
    #[error("Unexpected response shape from {endpoint}")]
    Shape {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn severity(&self) -> Severity {
        match self {
            ApiError::Connect(_) | ApiError::Read(_) | ApiError::Status(_) => Severity::Critical,
            ApiError::Client(_) | ApiError::Json(_) | ApiError::Shape { .. } => Severity::Unknown,
        }
    }
}
