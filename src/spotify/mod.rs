//! # Spotify Integration Module
//!
//! This module is the integration layer between mixport and the Spotify Web
//! API: authorization, source playlist loading, track search and playlist
//! mutation. It abstracts away HTTP requests, the OAuth flow and API quirks,
//! providing a clean Rust interface for the CLI and the migration pipeline.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authorization (OAuth 2.0 authorization-code flow)
//!     ├── Request Execution (per-call token provisioning)
//!     ├── Source Playlists (playlist/album loading, normalization)
//!     ├── Track Search (best-effort matching)
//!     └── Playlist Mutation (create, batched track adds)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API / Token Service
//! ```
//!
//! ## Authorization strategy
//!
//! [`auth`] drives the redirect-based authorization-code flow. The client
//! secret never enters this process: the one-time code exchange and all
//! app-token minting go through the trusted token service. A local axum
//! server receives the redirect, and an anti-forgery `state` token ties the
//! callback to the attempt that opened the browser.
//!
//! ## Request execution
//!
//! [`request`] provides the shared executor for user-authorized calls. It
//! re-acquires a token from the provider once per call (refreshing expired
//! tokens along the way) and otherwise propagates request failures verbatim.
//! Reading public source playlists uses app-level tokens instead and
//! escalates to the user-auth path only on a 401.
//!
//! ## API coverage
//!
//! - `GET /playlists/{id}` / `GET /albums/{id}` - source resource loading
//! - `GET /search` - track matching (`track:<name> artist:<artist>`)
//! - `GET /me` - current user profile
//! - `POST /users/{user_id}/playlists` - destination playlist creation
//! - `POST /playlists/{playlist_id}/tracks` - batched track adds (≤100)
//!
//! ## Error handling
//!
//! All operations return [`crate::error::ApiError`]. Non-2xx provider
//! responses carry the endpoint's intent in the message; a track search with
//! zero hits is data (`Ok(None)`), not an error.

pub mod auth;
pub mod playlist;
pub mod request;
pub mod search;
pub mod user;
