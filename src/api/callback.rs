use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify, types::AuthAttempt, warning};

/// Handles the provider redirect for one authorization attempt.
///
/// Exactly one of three things happened upstream: the user granted access
/// (a `code` arrives), the user denied it (`error` arrives), or the request
/// is not ours (`state` mismatch). The first terminal outcome written to the
/// shared slot wins; `authorize` is polling for it.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthAttempt>>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(ref mut attempt) = state.as_mut() else {
        return Html("<h4>No authorization attempt in flight.</h4>");
    };

    match params.get("state") {
        Some(s) if *s == attempt.csrf_state => {}
        _ => return Html("<h4>State mismatch. Request ignored.</h4>"),
    }

    if params.contains_key("error") {
        attempt.denied = true;
        return Html("<h4>Authorization denied.</h4><p>You can close this window.</p>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    match spotify::auth::exchange_code(code).await {
        Ok(token) => {
            attempt.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
