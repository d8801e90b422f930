use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Absolute expiry, milliseconds since epoch. Derived from issue time
    /// plus the lifetime reported by the token service.
    pub expires_at: u64,
}

impl Token {
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at
    }
}

/// Shared slot for one in-flight authorization attempt. The callback handler
/// fills `token` or sets `denied`; `authorize` polls for either.
#[derive(Debug, Clone)]
pub struct AuthAttempt {
    pub csrf_state: String,
    pub token: Option<Token>,
    pub denied: bool,
}

/// Token payload returned by the trusted token service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackArtist {
    pub name: String,
}

/// Provider-independent track descriptor, produced by the source playlist
/// loader and consumed by the search matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenericTrack {
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: Option<String>,
}

impl GenericTrack {
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(|a| a.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub url: String,
}

/// Canonical source playlist shape. Both playlist and album resources are
/// normalized into this before any downstream use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<Image>,
    pub tracks: Vec<GenericTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub images: Option<Vec<Image>>,
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub items: Vec<PlaylistTrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    // null for tracks that are no longer available
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub images: Option<Vec<Image>>,
    pub tracks: AlbumTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTracks {
    pub items: Vec<AlbumTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTrack {
    pub name: String,
    pub artists: Vec<TrackArtist>,
}

/// The two provider resource shapes a shared URL can point at.
#[derive(Debug, Clone)]
pub enum PlaylistLike {
    Playlist(PlaylistResponse),
    Album(AlbumResponse),
}

impl PlaylistLike {
    /// Normalizes either shape into the canonical [`SourcePlaylist`]. For an
    /// album the description is synthesized from its first artist and the
    /// album name is attached to every track.
    pub fn normalize(self) -> SourcePlaylist {
        match self {
            PlaylistLike::Playlist(p) => SourcePlaylist {
                id: p.id,
                name: p.name,
                description: p.description,
                images: p.images.unwrap_or_default(),
                tracks: p
                    .tracks
                    .items
                    .into_iter()
                    .filter_map(|item| item.track)
                    .map(|t| GenericTrack {
                        name: t.name,
                        artists: t.artists,
                        album: t.album.map(|a| a.name),
                    })
                    .collect(),
            },
            PlaylistLike::Album(a) => {
                let album_name = a.name.clone();
                let description = a
                    .artists
                    .first()
                    .map(|artist| format!("Album by {}", artist.name));
                SourcePlaylist {
                    id: a.id,
                    name: a.name,
                    description,
                    images: a.images.unwrap_or_default(),
                    tracks: a
                        .tracks
                        .items
                        .into_iter()
                        .map(|t| GenericTrack {
                            name: t.name,
                            artists: t.artists,
                            album: Some(album_name.clone()),
                        })
                        .collect(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracks {
    pub items: Vec<FoundTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundTrack {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPhase {
    Searching,
    Adding,
}

impl std::fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationPhase::Searching => write!(f, "searching"),
            MigrationPhase::Adding => write!(f, "adding"),
        }
    }
}

/// One progress emission from the migration pipeline. Delivered synchronously
/// through the caller's callback, never batched.
#[derive(Debug, Clone)]
pub struct MigrationProgress {
    pub message: String,
    pub percent: f32,
    pub phase: MigrationPhase,
    pub current_track: Option<GenericTrack>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
}
