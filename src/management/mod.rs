mod auth;
mod migration;

pub use auth::TokenManager;
pub use auth::user_access_token;
pub use migration::MigrationApi;
pub use migration::MigrationState;
pub use migration::PlaylistMigrator;
pub use migration::SpotifyMigrationApi;
