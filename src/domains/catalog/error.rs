//! Catalog client error types.

use thiserror::Error;

/// Errors returned by catalog fetches.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered 404 for the requested entity.
    #[error("{0} not found")]
    NotFound(String),

    /// The catalog answered with a non-2xx status other than 404.
    #[error("HTTP {status}: {status_text}")]
    Network { status: u16, status_text: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON shape the endpoint promises.
    #[error("Invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Create a "not found" error for the named entity.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a status error.
    pub fn network(status: u16, status_text: impl Into<String>) -> Self {
        Self::Network {
            status,
            status_text: status_text.into(),
        }
    }

    /// Whether this error means the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
