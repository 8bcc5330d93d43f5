//! Startup errors
//!
//! Everything here is fatal: once the listener is bound, request-level
//! failures are turned into responses and never surface as `ServerError`.

use std::fmt;
use std::io;
use std::net::SocketAddr;

#[derive(Debug)]
pub enum ServerError {
    /// Configuration sources could not be read or deserialized
    Config(::config::ConfigError),
    /// Configured host/port do not form a socket address
    Address(String),
    /// Log files could not be opened
    Logger(io::Error),
    /// Listener could not be established
    Bind { addr: SocketAddr, source: io::Error },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Address(msg) => f.write_str(msg),
            Self::Logger(e) => write!(f, "failed to open log files: {e}"),
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Address(_) => None,
            Self::Logger(e) | Self::Bind { source: e, .. } => Some(e),
        }
    }
}

impl From<::config::ConfigError> for ServerError {
    fn from(e: ::config::ConfigError) -> Self {
        Self::Config(e)
    }
}
