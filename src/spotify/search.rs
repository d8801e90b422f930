use reqwest::Client;

use crate::{
    config,
    error::ApiError,
    management::user_access_token,
    spotify::request::retry_with_fresh_token,
    types::{GenericTrack, SearchResponse},
};

/// Resolves a track descriptor to a provider track URI via search.
///
/// The query is built from the track title and its first listed artist only;
/// additional artists are ignored, which is an acceptable approximate-match
/// policy for this domain. Exactly one search request is made, asking for a
/// single result.
///
/// # Returns
///
/// `Ok(Some(uri))` with the top-ranked candidate, or `Ok(None)` when the
/// search came back empty. An empty result is a valid, expected outcome and
/// never an error; callers accumulate such tracks as unmatched instead of
/// aborting.
///
/// # Errors
///
/// A non-2xx search response surfaces as [`ApiError::RequestFailed`] with
/// the intent "Failed to search track".
pub async fn search_track(track: &GenericTrack) -> Result<Option<String>, ApiError> {
    retry_with_fresh_token(
        |token| async move {
            let query = format!("track:{} artist:{}", track.name, track.primary_artist());

            let client = Client::new();
            let response = client
                .get(format!("{}/search", config::spotify_apiurl()))
                .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
                .bearer_auth(token)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ApiError::request_failed(
                    "Failed to search track",
                    response.status(),
                ));
            }

            let res = response.json::<SearchResponse>().await?;
            Ok(res.tracks.items.into_iter().next().map(|t| t.uri))
        },
        user_access_token,
    )
    .await
}
