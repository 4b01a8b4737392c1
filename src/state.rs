use std::sync::{Arc, Mutex, MutexGuard};

use crate::{config::Config, error::ApiError, store::Store};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    store: Mutex<Store>,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Self::with_store(Store::seeded())
    }

    pub fn with_store(store: Store) -> Arc<Self> {
        Arc::new(Self {
            config: Config::load(),
            store: Mutex::new(store),
        })
    }

    /// Every record read or write goes through this guard, so a request's
    /// existence check and the mutation that follows observe the same state.
    pub fn store(&self) -> Result<MutexGuard<'_, Store>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("record store lock poisoned".to_string()))
    }
}
