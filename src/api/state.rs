use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{catalog::Catalog, models::UserPreference};

/// Shared application state
///
/// The catalog is immutable after load; only the session preference is
/// behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub preference: Arc<RwLock<UserPreference>>,
    pub default_limit: usize,
}

impl AppState {
    /// Creates state over a loaded catalog with a fresh session
    pub fn new(catalog: Catalog, default_limit: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            preference: Arc::new(RwLock::new(UserPreference::new())),
            default_limit,
        }
    }
}
