// Application state module
// Read-only state shared by every connection task

use std::path::PathBuf;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Directory request paths are resolved against
    pub root: PathBuf,
    // Cached config values for fast access in the request path
    pub access_log: bool,
    pub access_log_format: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            root: PathBuf::from(&config.files.root),
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
        }
    }

    pub const fn confine_to_root(&self) -> bool {
        self.config.files.confine_to_root
    }
}
