use thiserror::Error;

use popcorn_core::controller::SearchFailure;

/// Errors from the movie catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    Api { status: u16 },

    /// The catalog's explicit empty-result marker.
    #[error("movie not found")]
    NoMatch,

    #[error("parse error: {0}")]
    Parse(String),

    /// The request was superseded before its result could be applied.
    #[error("request cancelled")]
    Cancelled,
}

impl From<CatalogError> for SearchFailure {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Cancelled => SearchFailure::Cancelled,
            CatalogError::NoMatch => SearchFailure::NoMatch,
            other => SearchFailure::Failed(other.to_string()),
        }
    }
}
