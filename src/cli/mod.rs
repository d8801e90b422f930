//! # CLI Module
//!
//! User-facing command implementations for mixport. Each command coordinates
//! the Spotify integration layer, token management and the migration
//! pipeline, and is responsible for user feedback (progress bars, status
//! messages) and for reducing errors to readable output.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the interactive Spotify authorization flow and persists
//!   the obtained token.
//! - [`show`] - Loads a source playlist or album from a shared URL and
//!   prints its tracks as a table.
//! - [`migrate`] - Loads a source playlist, creates a private destination
//!   playlist in the user's account and copies the tracks across, driving a
//!   progress bar from the pipeline's callback.
//!
//! ## Error handling
//!
//! Commands terminate through the `error!` macro on unrecoverable failures.
//! Only human-readable messages reach the user; the one error kind handled
//! specially is `AuthRequired`, which turns into a hint to run
//! `mixport auth`.

mod auth;
mod migrate;
mod show;

pub use auth::auth;
pub use migrate::migrate;
pub use show::show;
