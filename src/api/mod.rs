//! # API Module
//!
//! HTTP endpoints for the local callback server that backs the interactive
//! authorization flow.
//!
//! - [`callback`] - Receives the provider redirect, verifies the anti-forgery
//!   state, performs the code-for-token exchange through the token service
//!   and deposits the result for the waiting flow.
//! - [`health`] - Health check returning application status and version.
//!
//! The endpoints are implemented as [Axum](https://docs.rs/axum) handlers and
//! wired up in [`crate::server`]. The callback is single-use by nature: one
//! authorization attempt owns the shared slot at a time.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
