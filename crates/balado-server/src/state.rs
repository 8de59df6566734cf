//! Application state management

use balado_core::PodcastGenerator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<PodcastGenerator>,
}

impl AppState {
    pub fn new(generator: PodcastGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}
