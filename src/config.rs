//! Configuration management for the playlist migration CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, server
//! settings, and the token service location.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory

use dotenv;
use std::{env, path::PathBuf};

/// OAuth scopes requested during authorization. Playlist write access for the
/// migration itself, profile read access for resolving the user id.
const SPOTIFY_SCOPES: [&str; 4] = [
    "playlist-modify-private",
    "playlist-modify-public",
    "user-read-private",
    "user-read-email",
];

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `mixport/.env`. Variables already present in
/// the process environment take precedence.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/mixport/.env`
/// - macOS: `~/Library/Application Support/mixport/.env`
/// - Windows: `%LOCALAPPDATA%/mixport/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mixport/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the server address for the local OAuth callback server.
///
/// Retrieves the `SERVER_ADDRESS` environment variable which specifies
/// the address and port where the local HTTP server should bind for
/// handling OAuth callbacks during the authentication flow.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// The client secret is deliberately absent from this module: it lives on the
/// token service, which performs all secret-bearing token operations.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at the local callback server.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the space-joined OAuth scope string requested during
/// authorization.
pub fn spotify_scope() -> String {
    SPOTIFY_SCOPES.join(" ")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the base URL of the trusted token service.
///
/// The token service holds the Spotify client secret and exposes the
/// code-exchange and token-minting operations the CLI delegates to.
///
/// # Panics
///
/// Panics if the `TOKEN_SERVICE_URL` environment variable is not set.
pub fn token_service_url() -> String {
    env::var("TOKEN_SERVICE_URL").expect("TOKEN_SERVICE_URL must be set")
}
