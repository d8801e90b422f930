use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, spotify, types::AuthAttempt};

pub async fn auth(shared_state: Arc<Mutex<Option<AuthAttempt>>>) {
    if let Err(e) = spotify::auth::authorize(shared_state).await {
        error!("Authentication failed: {}", e);
    }
}
