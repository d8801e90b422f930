use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    config,
    error::ApiError,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AuthAttempt, Token, TokenResponse},
    utils, warning,
};

/// Drives the interactive OAuth 2.0 authorization-code flow.
///
/// The function orchestrates the whole handshake:
/// 1. Generates a random anti-forgery `state` token
/// 2. Starts the local callback server
/// 3. Opens the provider authorization URL in the user's browser
/// 4. Polls the shared state until the callback delivers a token or the
///    user denies the request
/// 5. Persists the obtained token for future API requests
///
/// The code-for-token exchange happens inside the callback handler and goes
/// through the trusted token service, so the client secret never touches
/// this process.
///
/// # Arguments
///
/// * `shared_state` - Slot shared with the callback handler carrying the
///   anti-forgery state and, eventually, the exchanged token
///
/// # Errors
///
/// Returns [`ApiError::AuthCancelled`] when the user denies the request or
/// the flow does not complete within the wait window. Token persistence
/// failures surface as IO errors.
pub async fn authorize(shared_state: Arc<Mutex<Option<AuthAttempt>>>) -> Result<(), ApiError> {
    let csrf_state = utils::generate_state_token();

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("response_type", "code".to_string()),
            ("client_id", config::spotify_client_id()),
            ("scope", config::spotify_scope()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("state", csrf_state.clone()),
        ],
    )
    .expect("SPOTIFY_API_AUTH_URL must be a valid URL");

    // Store the anti-forgery state before the redirect can come back
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthAttempt {
            csrf_state,
            token: None,
            denied: false,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_completion(shared_state).await?;

    let token_manager = TokenManager::new(token);
    token_manager.persist().await?;

    success!("Authentication successful!");
    Ok(())
}

/// Waits for the authorization attempt to reach a terminal state.
///
/// Polls the shared slot at a fixed 1-second interval until the callback
/// handler has deposited a token, the user denied the request, or the
/// 60-second wait window elapses. The first terminal state observed wins;
/// later writes to the slot are ignored.
async fn wait_for_completion(
    shared_state: Arc<Mutex<Option<AuthAttempt>>>,
) -> Result<Token, ApiError> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        {
            let lock = shared_state.lock().await;
            if let Some(attempt) = lock.as_ref() {
                if let Some(token) = &attempt.token {
                    return Ok(token.clone());
                }
                if attempt.denied {
                    return Err(ApiError::AuthCancelled);
                }
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err(ApiError::AuthCancelled)
}

/// Exchanges an authorization code for a token through the token service.
///
/// The token service holds the client secret and talks to the provider's
/// token endpoint on our behalf; this process only ever sees the resulting
/// access and refresh tokens. The reported lifetime is converted into an
/// absolute expiry timestamp at this point.
///
/// # Errors
///
/// Non-2xx responses from the token service surface as
/// [`ApiError::RequestFailed`]; network and decode failures are wrapped
/// accordingly.
pub async fn exchange_code(code: &str) -> Result<Token, ApiError> {
    let client = Client::new();
    let res = client
        .post(format!("{}/spotify/exchange", config::token_service_url()))
        .json(&serde_json::json!({
            "code": code,
            "redirect_uri": config::spotify_redirect_uri(),
        }))
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(ApiError::request_failed(
            "Failed to exchange code",
            res.status(),
        ));
    }

    let token: TokenResponse = res.json().await?;
    Ok(token_from_response(token))
}

/// Requests an app-level token from the token service.
///
/// Used for public read-only access to source playlists and as the refresh
/// path once a user token has expired. No user interaction is involved.
pub async fn mint_token() -> Result<TokenResponse, ApiError> {
    let client = Client::new();
    let res = client
        .post(format!("{}/spotify/token", config::token_service_url()))
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(ApiError::request_failed(
            "Failed to get app token",
            res.status(),
        ));
    }

    Ok(res.json().await?)
}

/// Converts a token service response into a stored token, stamping the
/// absolute expiry from the current time and the reported lifetime.
pub fn token_from_response(res: TokenResponse) -> Token {
    let now_ms = Utc::now().timestamp_millis() as u64;
    Token {
        access_token: res.access_token,
        refresh_token: res.refresh_token,
        expires_at: now_ms + res.expires_in * 1000,
    }
}
