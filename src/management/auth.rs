use std::{path::PathBuf, sync::Arc};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{error::ApiError, spotify, types::Token, warning};

/// Single-slot store for the user's OAuth token, persisted as JSON in the
/// local data directory. There is no locking discipline around the cache
/// file; two processes refreshing at once can race, which is accepted for a
/// single-user CLI.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, ApiError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), ApiError> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns a usable access token.
    ///
    /// The unexpired cached token is returned unchanged without any network
    /// call. An expired token with a cached refresh token triggers exactly
    /// one minting call through the token service; on success all stored
    /// fields are overwritten together and persisted. With no refresh token
    /// left, an interactive authorization is started in the background and
    /// the caller gets [`ApiError::AuthRequired`].
    pub async fn get_valid_access_token(&mut self) -> Result<String, ApiError> {
        let now_ms = Utc::now().timestamp_millis() as u64;
        if self.token.is_valid_at(now_ms) {
            return Ok(self.token.access_token.clone());
        }

        if self.token.refresh_token.is_some() {
            let minted = spotify::auth::mint_token().await?;
            let refreshed = spotify::auth::token_from_response(minted);
            // keep the previous refresh token unless the service rotated it
            let refresh_token = refreshed
                .refresh_token
                .or_else(|| self.token.refresh_token.clone());
            self.token = Token {
                refresh_token,
                ..refreshed
            };
            self.persist().await?;
            return Ok(self.token.access_token.clone());
        }

        start_background_authorization();
        Err(ApiError::AuthRequired)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("mixport/cache/token.json");
        path
    }
}

/// Token provider for user-authorized API calls.
///
/// Loads the cached token and hands out a valid access token, refreshing it
/// first when needed. With nothing cached at all the interactive flow is
/// started in the background so a later attempt can succeed, and the current
/// call fails with [`ApiError::AuthRequired`].
pub async fn user_access_token() -> Result<String, ApiError> {
    match TokenManager::load().await {
        Ok(mut manager) => manager.get_valid_access_token().await,
        Err(_) => {
            start_background_authorization();
            Err(ApiError::AuthRequired)
        }
    }
}

fn start_background_authorization() {
    let state = Arc::new(Mutex::new(None));
    tokio::spawn(async move {
        if let Err(e) = spotify::auth::authorize(state).await {
            warning!("Authorization not completed: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: u64) -> Token {
        Token {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at,
        }
    }

    #[test]
    fn unexpired_token_is_valid() {
        let now_ms = Utc::now().timestamp_millis() as u64;
        assert!(token(now_ms + 60_000).is_valid_at(now_ms));
        assert!(!token(now_ms).is_valid_at(now_ms));
        assert!(!token(now_ms - 1).is_valid_at(now_ms));
    }

    #[tokio::test]
    async fn cached_token_returned_unchanged() {
        let now_ms = Utc::now().timestamp_millis() as u64;
        let mut manager = TokenManager::new(token(now_ms + 3_600_000));

        // fast path: no refresh, no persistence, value untouched
        let access = manager.get_valid_access_token().await.unwrap();
        assert_eq!(access, "access");
        assert_eq!(manager.current_token().access_token, "access");
        assert_eq!(
            manager.current_token().refresh_token.as_deref(),
            Some("refresh")
        );
    }
}
