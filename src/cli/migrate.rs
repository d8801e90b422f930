use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    error::ApiError,
    info,
    management::{PlaylistMigrator, SpotifyMigrationApi},
    spotify, success, utils,
};

pub async fn migrate(url: String, name: Option<String>, description: Option<String>) {
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

    let source = match spotify::playlist::get_source_playlist(&id).await {
        Ok(p) => p,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to load playlist: {}", e);
        }
    };
    pb.finish_and_clear();

    info!(
        "Loaded \"{}\" with {} tracks",
        source.name,
        source.tracks.len()
    );

    let playlist_name = name.unwrap_or_else(|| source.name.clone());
    let playlist_description = description.or_else(|| source.description.clone());

    let playlist_id =
        match spotify::playlist::create(playlist_name.clone(), playlist_description).await {
            Ok(id) => id,
            Err(ApiError::AuthRequired) => {
                error!("Authorization required. Run `mixport auth` first.");
            }
            Err(e) => error!("Failed to create playlist: {}", e),
        };
    success!("Created playlist \"{}\"", playlist_name);

    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::with_template("{bar:40.blue} {pos:>3}% {msg}").unwrap());

    let mut migrator = PlaylistMigrator::new(SpotifyMigrationApi);
    let result = migrator
        .migrate(&source.tracks, &playlist_id, |progress| {
            bar.set_position(progress.percent.round() as u64);
            bar.set_message(progress.message);
        })
        .await;

    match result {
        Ok(()) => {
            bar.set_position(100);
            bar.finish_and_clear();
            success!(
                "Migration complete. \"{}\" is now in your library.",
                playlist_name
            );
        }
        Err(ApiError::AuthRequired) => {
            bar.finish_and_clear();
            error!("Authorization required. Run `mixport auth` first.");
        }
        Err(e) => {
            bar.finish_and_clear();
            error!("Migration failed: {}", e);
        }
    }
}
