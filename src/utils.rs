use rand::{Rng, distr::Alphanumeric};

/// Provider limit for playlist descriptions.
const MAX_DESCRIPTION_LEN: usize = 300;

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn extract_playlist_id(url: &str) -> Option<String> {
    let start = ["/playlist/", "/album/"]
        .iter()
        .find_map(|marker| url.find(marker).map(|i| i + marker.len()))?;
    let id: String = url[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if id.is_empty() { None } else { Some(id) }
}

pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        let mut truncated: String = description.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
        truncated.push_str("...");
        truncated
    } else {
        description.to_string()
    }
}
