// Server module entry
// Lifecycle: `Server::bind` (init) -> `Server::serve` (accept loop) -> drain (shutdown)

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::shutdown_signal;

/// A bound file server
///
/// The listener lives as long as the `Server`; `serve` consumes it and
/// releases the socket when it returns.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
}

impl Server {
    /// Bind the configured address. Must be called from within a Tokio runtime.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let addr = config.get_socket_addr().map_err(ServerError::Address)?;
        let listener =
            create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            listener,
            state: Arc::new(AppState::new(config)),
            active_connections: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Actual bound address (differs from the configured one for port 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` resolves, then close the listener and wait up
    /// to `performance.shutdown_grace` seconds for in-flight connections.
    pub async fn serve<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let graceful = GracefulShutdown::new();

        start_server_loop(
            &self.listener,
            &self.state,
            &self.active_connections,
            &graceful,
            shutdown,
        )
        .await;

        drop(self.listener);
        logger::log_server_stop(self.active_connections.load(Ordering::SeqCst));

        let grace = Duration::from_secs(self.state.config.performance.shutdown_grace);
        if tokio::time::timeout(grace, graceful.shutdown()).await.is_err() {
            logger::log_warning(&format!(
                "Shutdown grace period of {}s elapsed, {} connection(s) abandoned",
                grace.as_secs(),
                self.active_connections.load(Ordering::SeqCst)
            ));
        }
    }

    /// Serve until SIGINT/SIGTERM
    pub async fn run(self) {
        self.serve(shutdown_signal()).await;
    }
}
