//! Shared handler state.

use std::sync::Arc;

use crate::lifecycle::GameService;

/// State handed to every route.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lifecycle manager shared across requests.
    pub service: Arc<GameService>,
}

impl AppState {
    /// Wraps a service for sharing.
    pub fn new(service: GameService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
