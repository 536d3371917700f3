use std::sync::Arc;

use chrono::{DateTime, Utc};

use dl_domain::config::Config;

use crate::pipeline::Brain;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub brain: Arc<Brain>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Arc<Config>, brain: Arc<Brain>) -> Self {
        Self {
            config,
            brain,
            started_at: Utc::now(),
        }
    }
}
