use std::time::Duration;

use crate::{
    error::ApiError,
    spotify,
    types::{GenericTrack, MigrationPhase, MigrationProgress},
    warning,
};

/// Provider-imposed limit of URIs per playlist-mutation call.
const ADD_BATCH_SIZE: usize = 100;

/// Self-throttling pause between consecutive mutation batches.
const BATCH_PAUSE: Duration = Duration::from_secs(1);

/// The provider calls the migration pipeline depends on, split out so the
/// pipeline can be exercised against a scripted double.
pub trait MigrationApi {
    async fn search_track(&self, track: &GenericTrack) -> Result<Option<String>, ApiError>;
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError>;
}

/// Production implementation backed by the Spotify Web API client.
pub struct SpotifyMigrationApi;

impl MigrationApi for SpotifyMigrationApi {
    async fn search_track(&self, track: &GenericTrack) -> Result<Option<String>, ApiError> {
        spotify::search::search_track(track).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
        spotify::playlist::add_tracks(playlist_id, uris).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    Idle,
    Searching,
    Adding,
    Done,
    Failed,
}

/// Copies a track list into a destination playlist in two strict phases:
/// search every track sequentially, then add the matches in batches.
///
/// Sequencing is deliberate. Searches run one at a time in original order,
/// which keeps the provider rate limiter happy and makes the reported
/// percentages deterministic. The search phase owns 0-50% of the progress
/// range, the add phase 50-100%.
pub struct PlaylistMigrator<A> {
    api: A,
    state: MigrationState,
}

impl<A: MigrationApi> PlaylistMigrator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: MigrationState::Idle,
        }
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    /// Runs the full migration into `playlist_id`.
    ///
    /// Tracks without a search match are collected and logged at the end;
    /// they never abort the run. A failed mutation batch does: the error
    /// propagates immediately, earlier batches stay committed on the
    /// provider side, and the migrator ends up in
    /// [`MigrationState::Failed`].
    ///
    /// `on_progress` is invoked synchronously before each search and before
    /// each batch, one emission per step.
    pub async fn migrate<F>(
        &mut self,
        tracks: &[GenericTrack],
        playlist_id: &str,
        mut on_progress: F,
    ) -> Result<(), ApiError>
    where
        F: FnMut(MigrationProgress),
    {
        self.state = MigrationState::Searching;

        let mut found: Vec<String> = Vec::new();
        let mut unmatched: Vec<GenericTrack> = Vec::new();

        for (i, track) in tracks.iter().enumerate() {
            on_progress(MigrationProgress {
                message: format!(
                    "Searching for \"{}\" by {}...",
                    track.name,
                    track.primary_artist()
                ),
                percent: (i as f32 / tracks.len() as f32) * 50.0,
                phase: MigrationPhase::Searching,
                current_track: Some(track.clone()),
            });

            match self.api.search_track(track).await? {
                Some(uri) => found.push(uri),
                None => unmatched.push(track.clone()),
            }
        }

        self.state = MigrationState::Adding;

        let batch_count = found.len().div_ceil(ADD_BATCH_SIZE);
        for (batch_index, batch) in found.chunks(ADD_BATCH_SIZE).enumerate() {
            let start = batch_index * ADD_BATCH_SIZE;
            on_progress(MigrationProgress {
                message: format!(
                    "Adding tracks {}-{} of {}...",
                    start + 1,
                    start + batch.len(),
                    found.len()
                ),
                percent: 50.0 + (start as f32 / found.len() as f32) * 50.0,
                phase: MigrationPhase::Adding,
                current_track: None,
            });

            if let Err(e) = self.api.add_tracks(playlist_id, batch).await {
                self.state = MigrationState::Failed;
                return Err(e);
            }

            if batch_index + 1 < batch_count {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
        }

        self.state = MigrationState::Done;

        if !unmatched.is_empty() {
            warning!("{} tracks were not found:", unmatched.len());
            for track in &unmatched {
                warning!("  {} - {}", track.primary_artist(), track.name);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    use reqwest::StatusCode;

    use super::*;
    use crate::types::TrackArtist;

    struct MockApi {
        misses: HashSet<String>,
        fail_at_batch: Option<usize>,
        added: RefCell<Vec<Vec<String>>>,
        batches_attempted: Cell<usize>,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                misses: HashSet::new(),
                fail_at_batch: None,
                added: RefCell::new(Vec::new()),
                batches_attempted: Cell::new(0),
            }
        }
    }

    impl MigrationApi for MockApi {
        async fn search_track(&self, track: &GenericTrack) -> Result<Option<String>, ApiError> {
            if self.misses.contains(&track.name) {
                Ok(None)
            } else {
                Ok(Some(format!("spotify:track:{}", track.name)))
            }
        }

        async fn add_tracks(&self, _playlist_id: &str, uris: &[String]) -> Result<(), ApiError> {
            let n = self.batches_attempted.get();
            self.batches_attempted.set(n + 1);
            if self.fail_at_batch == Some(n) {
                return Err(ApiError::request_failed(
                    "Failed to add tracks to playlist",
                    StatusCode::BAD_GATEWAY,
                ));
            }
            self.added.borrow_mut().push(uris.to_vec());
            Ok(())
        }
    }

    fn tracks(n: usize) -> Vec<GenericTrack> {
        (0..n)
            .map(|i| GenericTrack {
                name: format!("track-{i}"),
                artists: vec![TrackArtist {
                    name: format!("artist-{i}"),
                }],
                album: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn search_phase_emits_one_event_per_track() {
        let list = tracks(5);
        let mut migrator = PlaylistMigrator::new(MockApi::new());
        let mut events: Vec<MigrationProgress> = Vec::new();

        migrator
            .migrate(&list, "dest", |p| events.push(p))
            .await
            .unwrap();

        let searching: Vec<&MigrationProgress> = events
            .iter()
            .filter(|p| p.phase == MigrationPhase::Searching)
            .collect();
        assert_eq!(searching.len(), 5);
        assert_eq!(searching[0].percent, 0.0);
        for pair in searching.windows(2) {
            assert!(pair[0].percent <= pair[1].percent);
        }
        assert!(searching.iter().all(|p| p.percent < 50.0));
        assert_eq!(
            searching[2].current_track.as_ref().unwrap().name,
            "track-2"
        );
        assert_eq!(migrator.state(), MigrationState::Done);
    }

    #[tokio::test]
    async fn unmatched_track_is_skipped_not_fatal() {
        let list = tracks(3);
        let mut api = MockApi::new();
        api.misses.insert("track-1".to_string());
        let mut migrator = PlaylistMigrator::new(api);

        migrator.migrate(&list, "dest", |_| {}).await.unwrap();

        let added = migrator.api.added.borrow();
        assert_eq!(added.len(), 1);
        assert_eq!(
            added[0],
            vec![
                "spotify:track:track-0".to_string(),
                "spotify:track:track-2".to_string()
            ]
        );
        assert_eq!(migrator.state(), MigrationState::Done);
    }

    #[tokio::test(start_paused = true)]
    async fn add_phase_batches_by_one_hundred() {
        let list = tracks(150);
        let mut migrator = PlaylistMigrator::new(MockApi::new());
        let mut events: Vec<MigrationProgress> = Vec::new();

        migrator
            .migrate(&list, "dest", |p| events.push(p))
            .await
            .unwrap();

        let added = migrator.api.added.borrow();
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].len(), 100);
        assert_eq!(added[1].len(), 50);
        assert_eq!(added.iter().map(Vec::len).sum::<usize>(), 150);

        let adding: Vec<&MigrationProgress> = events
            .iter()
            .filter(|p| p.phase == MigrationPhase::Adding)
            .collect();
        assert_eq!(adding.len(), 2);
        assert_eq!(adding[0].percent, 50.0);
        assert!(adding[1].percent > 50.0 && adding[1].percent < 100.0);
        assert_eq!(adding[0].message, "Adding tracks 1-100 of 150...");
        assert_eq!(adding[1].message, "Adding tracks 101-150 of 150...");
        assert_eq!(migrator.state(), MigrationState::Done);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_batch_aborts_and_keeps_earlier_batches() {
        let list = tracks(150);
        let mut api = MockApi::new();
        api.fail_at_batch = Some(1);
        let mut migrator = PlaylistMigrator::new(api);

        let result = migrator.migrate(&list, "dest", |_| {}).await;

        assert!(matches!(
            result,
            Err(ApiError::RequestFailed {
                intent: "Failed to add tracks to playlist",
                ..
            })
        ));
        assert_eq!(migrator.state(), MigrationState::Failed);
        // batch 0 was already committed before the failure
        let added = migrator.api.added.borrow();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].len(), 100);
        assert_eq!(migrator.api.batches_attempted.get(), 2);
    }

    #[tokio::test]
    async fn empty_track_list_completes_without_calls() {
        let mut migrator = PlaylistMigrator::new(MockApi::new());
        let mut events: Vec<MigrationProgress> = Vec::new();

        migrator
            .migrate(&[], "dest", |p| events.push(p))
            .await
            .unwrap();

        assert!(events.is_empty());
        assert_eq!(migrator.api.batches_attempted.get(), 0);
        assert_eq!(migrator.state(), MigrationState::Done);
    }
}
