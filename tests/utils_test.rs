use mixport::utils::*;

#[test]
fn test_generate_state_token() {
    let token = generate_state_token();

    // Should be exactly 32 characters
    assert_eq!(token.len(), 32);

    // Should contain only alphanumeric characters
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    let token2 = generate_state_token();
    assert_ne!(token, token2);
}

#[test]
fn test_extract_playlist_id_from_playlist_url() {
    let id = extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M");
    assert_eq!(id.as_deref(), Some("37i9dQZF1DXcBWIGoYBM5M"));

    // Query strings are ignored
    let id = extract_playlist_id(
        "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123&pt=xyz",
    );
    assert_eq!(id.as_deref(), Some("37i9dQZF1DXcBWIGoYBM5M"));
}

#[test]
fn test_extract_playlist_id_from_album_url() {
    // Album links are accepted as playlist-like sources
    let id = extract_playlist_id("https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy");
    assert_eq!(id.as_deref(), Some("4aawyAB9vmqN3uQ7FjRGTy"));
}

#[test]
fn test_extract_playlist_id_invalid_inputs() {
    // No playlist or album segment
    assert_eq!(extract_playlist_id("https://open.spotify.com/artist/abc"), None);

    // Marker present but no id behind it
    assert_eq!(extract_playlist_id("https://open.spotify.com/playlist/"), None);

    // Not a URL at all
    assert_eq!(extract_playlist_id("not a url"), None);
}

#[test]
fn test_truncate_description_short_unchanged() {
    let short = "An ordinary description";
    assert_eq!(truncate_description(short), short);

    // Exactly at the limit stays untouched
    let exact = "x".repeat(300);
    assert_eq!(truncate_description(&exact), exact);
}

#[test]
fn test_truncate_description_long_is_cut() {
    let long = "y".repeat(301);
    let truncated = truncate_description(&long);

    // 297 characters plus the ellipsis
    assert_eq!(truncated.chars().count(), 300);
    assert!(truncated.ends_with("..."));
    assert!(truncated.starts_with("yyy"));
}
