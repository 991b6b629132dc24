//! HTTP client for the remote movie catalog.
//!
//! Two read-only endpoints: search by title and fetch by id. The catalog
//! reports "no results" in-band (`Response: "False"`), which the client
//! surfaces as [`CatalogError::NoMatch`] so the controller can tell it
//! apart from a transport failure.

pub mod client;
pub mod error;
pub mod types;

pub use client::OmdbClient;
pub use error::CatalogError;
