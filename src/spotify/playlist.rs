use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::ApiError,
    management::user_access_token,
    spotify::{auth, request::retry_with_fresh_token, user},
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, AlbumResponse,
        CreatePlaylistRequest, CreatePlaylistResponse, PlaylistLike, PlaylistResponse,
        SourcePlaylist,
    },
    utils,
};

/// Loads a source playlist by id and normalizes it to the canonical shape.
///
/// Shared URLs can point at either a playlist or an album; both are treated
/// as "playlist-like". The lookup order is:
/// 1. `GET /playlists/{id}` with an app-level token (public read access)
/// 2. `GET /albums/{id}` as fallback for album-as-playlist links
/// 3. On a 401 from either endpoint the resource is private to the user, so
///    the lookup switches to the user-auth path as a separate strategy
///
/// # Errors
///
/// [`ApiError::ResourceNotFound`] when neither endpoint resolves the id;
/// token service and network failures propagate as usual.
pub async fn get_source_playlist(id: &str) -> Result<SourcePlaylist, ApiError> {
    let token = auth::mint_token().await?.access_token;
    let client = Client::new();

    let response = client
        .get(format!("{}/playlists/{}", config::spotify_apiurl(), id))
        .bearer_auth(&token)
        .send()
        .await?;
    if response.status().is_success() {
        let playlist = response.json::<PlaylistResponse>().await?;
        return Ok(PlaylistLike::Playlist(playlist).normalize());
    }
    let playlist_status = response.status();

    let album_response = client
        .get(format!("{}/albums/{}", config::spotify_apiurl(), id))
        .bearer_auth(&token)
        .send()
        .await?;
    if album_response.status().is_success() {
        let album = album_response.json::<AlbumResponse>().await?;
        return Ok(PlaylistLike::Album(album).normalize());
    }

    // Private resources answer 401 to the app token; retry as the user.
    if playlist_status == StatusCode::UNAUTHORIZED
        || album_response.status() == StatusCode::UNAUTHORIZED
    {
        return get_playlist_with_user_auth(id).await;
    }

    Err(ApiError::ResourceNotFound(id.to_string()))
}

async fn get_playlist_with_user_auth(id: &str) -> Result<SourcePlaylist, ApiError> {
    retry_with_fresh_token(
        |token| async move {
            let client = Client::new();

            let response = client
                .get(format!("{}/playlists/{}", config::spotify_apiurl(), id))
                .bearer_auth(&token)
                .send()
                .await?;
            if response.status().is_success() {
                let playlist = response.json::<PlaylistResponse>().await?;
                return Ok(PlaylistLike::Playlist(playlist).normalize());
            }

            let album_response = client
                .get(format!("{}/albums/{}", config::spotify_apiurl(), id))
                .bearer_auth(&token)
                .send()
                .await?;
            if !album_response.status().is_success() {
                return Err(ApiError::request_failed(
                    "Failed to fetch playlist or album",
                    album_response.status(),
                ));
            }

            let album = album_response.json::<AlbumResponse>().await?;
            Ok(PlaylistLike::Album(album).normalize())
        },
        user_access_token,
    )
    .await
}

/// Creates a private playlist in the user's account and returns its id.
///
/// The owning user id is resolved through the profile endpoint first.
/// Descriptions beyond the provider limit are truncated before submission.
pub async fn create(name: String, description: Option<String>) -> Result<String, ApiError> {
    let user_id = user::current_user_id().await?;
    let description = utils::truncate_description(&description.unwrap_or_default());

    retry_with_fresh_token(
        |token| async move {
            let body = CreatePlaylistRequest {
                name,
                description,
                public: false,
            };

            let client = Client::new();
            let response = client
                .post(format!(
                    "{}/users/{}/playlists",
                    config::spotify_apiurl(),
                    user_id
                ))
                .bearer_auth(token)
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ApiError::request_failed(
                    "Failed to create playlist",
                    response.status(),
                ));
            }

            let res = response.json::<CreatePlaylistResponse>().await?;
            Ok(res.id)
        },
        user_access_token,
    )
    .await
}

/// Adds up to 100 track URIs to a playlist in a single mutation call.
///
/// Batch partitioning and pacing live in the migration pipeline; this is
/// one provider call per invocation.
pub async fn add_tracks(playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
    retry_with_fresh_token(
        |token| async move {
            let body = AddTracksToPlaylistRequest {
                uris: uris.to_vec(),
            };

            let client = Client::new();
            let response = client
                .post(format!(
                    "{}/playlists/{}/tracks",
                    config::spotify_apiurl(),
                    playlist_id
                ))
                .bearer_auth(token)
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ApiError::request_failed(
                    "Failed to add tracks to playlist",
                    response.status(),
                ));
            }

            let _ = response.json::<AddTracksToPlaylistResponse>().await?;
            Ok(())
        },
        user_access_token,
    )
    .await
}
