//! Core domain logic and state for the popcorn movie tracker.
//!
//! The heart of the crate is [`controller::Controller`], a synchronous
//! state machine that owns the search query, result list, current
//! selection, and the persisted watched list. User intents go in as
//! method calls; network work comes back out as [`controller::Effect`]
//! values for the front-end to run on whatever runtime it has. This keeps
//! every state transition unit-testable without a UI or a live socket.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod store;
pub mod summary;

pub use controller::{Controller, Effect, SearchFailure, SearchToken};
pub use error::PopcornError;
