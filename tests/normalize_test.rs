use mixport::types::{
    AlbumResponse, AlbumTrack, AlbumTracks, Image, PlaylistLike, PlaylistResponse, PlaylistTrack,
    PlaylistTrackItem, PlaylistTracks, TrackAlbum, TrackArtist,
};

fn artist(name: &str) -> TrackArtist {
    TrackArtist {
        name: name.to_string(),
    }
}

fn playlist_item(name: &str, artist_name: &str, album: Option<&str>) -> PlaylistTrackItem {
    PlaylistTrackItem {
        track: Some(PlaylistTrack {
            name: name.to_string(),
            artists: vec![artist(artist_name)],
            album: album.map(|a| TrackAlbum {
                name: a.to_string(),
            }),
        }),
    }
}

#[test]
fn test_normalize_playlist() {
    let playlist = PlaylistResponse {
        id: "pl1".to_string(),
        name: "Road Trip".to_string(),
        description: Some("Windows down".to_string()),
        images: Some(vec![Image {
            url: "https://img.example/cover.jpg".to_string(),
        }]),
        tracks: PlaylistTracks {
            items: vec![
                playlist_item("Song A", "Artist A", Some("Album A")),
                playlist_item("Song B", "Artist B", None),
            ],
        },
    };

    let source = PlaylistLike::Playlist(playlist).normalize();

    assert_eq!(source.id, "pl1");
    assert_eq!(source.name, "Road Trip");
    assert_eq!(source.description.as_deref(), Some("Windows down"));
    assert_eq!(source.images.len(), 1);

    // Track order and metadata survive normalization
    assert_eq!(source.tracks.len(), 2);
    assert_eq!(source.tracks[0].name, "Song A");
    assert_eq!(source.tracks[0].primary_artist(), "Artist A");
    assert_eq!(source.tracks[0].album.as_deref(), Some("Album A"));
    assert_eq!(source.tracks[1].album, None);
}

#[test]
fn test_normalize_playlist_skips_unavailable_tracks() {
    let playlist = PlaylistResponse {
        id: "pl2".to_string(),
        name: "Mixed".to_string(),
        description: None,
        images: None,
        tracks: PlaylistTracks {
            items: vec![
                playlist_item("Kept", "Artist", None),
                // unavailable entries come back as null tracks
                PlaylistTrackItem { track: None },
                playlist_item("Also Kept", "Artist", None),
            ],
        },
    };

    let source = PlaylistLike::Playlist(playlist).normalize();

    assert_eq!(source.tracks.len(), 2);
    assert_eq!(source.tracks[0].name, "Kept");
    assert_eq!(source.tracks[1].name, "Also Kept");
}

#[test]
fn test_normalize_album_as_playlist() {
    let album = AlbumResponse {
        id: "al1".to_string(),
        name: "Blue Album".to_string(),
        artists: vec![artist("The Band"), artist("Guest")],
        images: Some(vec![Image {
            url: "https://img.example/album.jpg".to_string(),
        }]),
        tracks: AlbumTracks {
            items: vec![
                AlbumTrack {
                    name: "Opener".to_string(),
                    artists: vec![artist("The Band")],
                },
                AlbumTrack {
                    name: "Closer".to_string(),
                    artists: vec![artist("The Band")],
                },
            ],
        },
    };

    let source = PlaylistLike::Album(album).normalize();

    assert_eq!(source.id, "al1");
    assert_eq!(source.name, "Blue Album");

    // Description is synthesized from the first album artist only
    assert_eq!(source.description.as_deref(), Some("Album by The Band"));

    // Every track carries the album name after normalization
    assert_eq!(source.tracks.len(), 2);
    assert!(
        source
            .tracks
            .iter()
            .all(|t| t.album.as_deref() == Some("Blue Album"))
    );
    assert_eq!(source.tracks[0].name, "Opener");
    assert_eq!(source.tracks[1].name, "Closer");
}
