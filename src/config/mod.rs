// Configuration module entry point
// Loads layered configuration and holds the runtime state shared by connections

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, FilesConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the default `config` file, if present
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, later ones win: built-in defaults, the optional file,
    /// `SERVER_*` environment variables (`__` separates nested keys,
    /// e.g. `SERVER_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, ::config::ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("files.root", ".")?
            .set_default("files.confine_to_root", false)?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 0)?
            .set_default("performance.shutdown_grace", 5)?
            .add_source(::config::File::with_name(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
