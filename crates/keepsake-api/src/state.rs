use std::sync::Arc;

use keepsake_db::{Database, StoreError};

use crate::error::ApiError;
use crate::storage::Storage;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub storage: Storage,
}

/// Run a store closure off the async runtime. Database access is blocking
/// (single SQLite connection behind a mutex), so every handler goes through
/// here.
pub async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("blocking task join error: {e}")))?
        .map_err(ApiError::from)
}
