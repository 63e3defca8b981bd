//! Sync server listener
//!
//! Binds the WebSocket endpoint and the liveness route, and owns the
//! process-wide pieces: coordinator, connection table, connection id
//! allocator, and the optional connection limit.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

use crate::error::{Error, Result};
use crate::server::config::ServerConfig;
use crate::server::connections::{ConnectionTable, WsBroadcaster};
use crate::server::ws;
use crate::sync::SyncCoordinator;

/// Shared state handed to every request handler
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) coordinator: Arc<SyncCoordinator<WsBroadcaster>>,
    pub(crate) connections: Arc<ConnectionTable>,
    pub(crate) next_connection_id: Arc<AtomicU64>,
    pub(crate) limit: Option<Arc<Semaphore>>,
}

/// WebSocket sync server
pub struct SyncServer {
    config: ServerConfig,
    state: AppState,
}

impl SyncServer {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let connections = Arc::new(ConnectionTable::new());
        let coordinator = Arc::new(SyncCoordinator::new(WsBroadcaster::new(Arc::clone(
            &connections,
        ))));

        let limit = if config.max_connections > 0 {
            Some(Arc::new(Semaphore::new(config.max_connections)))
        } else {
            None
        };

        Self {
            config,
            state: AppState {
                coordinator,
                connections,
                next_connection_id: Arc::new(AtomicU64::new(1)),
                limit,
            },
        }
    }

    /// Get a reference to the sync coordinator
    pub fn coordinator(&self) -> &Arc<SyncCoordinator<WsBroadcaster>> {
        &self.state.coordinator
    }

    /// Get a reference to the connection table
    pub fn connections(&self) -> &Arc<ConnectionTable> {
        &self.state.connections
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> std::net::SocketAddr {
        self.config.bind_addr
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/ws", get(ws::ws_handler))
            .route("/healthz", get(healthz))
            .with_state(self.state.clone())
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down. Failure to bind
    /// the listener is the one process-fatal error.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(Error::Bind)?;
        tracing::info!(addr = %self.config.bind_addr, "Sync server listening");

        axum::serve(listener, self.router()).await.map_err(Error::Io)
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(Error::Bind)?;
        tracing::info!(addr = %self.config.bind_addr, "Sync server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(Error::Io)
    }
}

/// Process liveness; deliberately not part of the sync protocol
async fn healthz() -> &'static str {
    "ok"
}
