use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{error, info, spotify, types::TrackTableRow, utils};

pub async fn show(url: String) {
    let Some(id) = utils::extract_playlist_id(&url) else {
        error!("Invalid playlist URL: {}", url);
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Loading source playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let playlist = match spotify::playlist::get_source_playlist(&id).await {
        Ok(p) => p,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to load playlist: {}", e);
        }
    };
    pb.finish_and_clear();

    info!("{} ({} tracks)", playlist.name, playlist.tracks.len());
    if let Some(description) = &playlist.description {
        if !description.is_empty() {
            info!("{}", description);
        }
    }

    let table_rows: Vec<TrackTableRow> = playlist
        .tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: t
                .artists
                .iter()
                .map(|a| a.name.clone())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
