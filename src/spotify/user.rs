use reqwest::Client;

use crate::{
    config, error::ApiError, management::user_access_token,
    spotify::request::retry_with_fresh_token, types::UserProfileResponse,
};

/// Returns the authenticated user's id from the profile endpoint.
///
/// Needed once per migration to address the playlist-creation endpoint.
pub async fn current_user_id() -> Result<String, ApiError> {
    retry_with_fresh_token(
        |token| async move {
            let client = Client::new();
            let response = client
                .get(format!("{}/me", config::spotify_apiurl()))
                .bearer_auth(token)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ApiError::request_failed(
                    "Failed to get user profile",
                    response.status(),
                ));
            }

            let profile = response.json::<UserProfileResponse>().await?;
            Ok(profile.id)
        },
        user_access_token,
    )
    .await
}
