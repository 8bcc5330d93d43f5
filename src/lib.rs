//! Minimal static file server
//!
//! Every request path, minus its leading `/`, is read relative to the serving
//! root and returned as `text/html` with status 200, or answered with a 404
//! naming the path when the read fails for any reason.
//!
//! ```no_run
//! use simple_web_server::{Config, Server};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let server = Server::bind(&config)?;
//! server.run().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use crate::config::Config;
pub use error::ServerError;
pub use server::Server;
