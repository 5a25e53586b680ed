use std::future::Future;
use std::sync::Arc;

use roomsync_store::FsProjectStore;
use roomsync_sync::SyncHandler;
use tokio::net::TcpListener;

use crate::auth::AccessGate;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// roomsync project server.
pub struct RoomSyncServer {
    config: ServerConfig,
    state: AppState,
}

impl RoomSyncServer {
    /// Build a server over a filesystem store rooted at `config.data_root`.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(FsProjectStore::new(config.data_root.clone()));
        let sync = Arc::new(SyncHandler::new(store));
        let state = AppState::new(sync, config.access_gate());
        Self { config, state }
    }

    /// Replace the access gate chosen by the configuration.
    pub fn with_gate(mut self, gate: Arc<dyn AccessGate>) -> Self {
        self.state.gate = gate;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), self.config.max_upload_size)
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            data_root = %self.config.data_root.display(),
            gated = self.config.auth_token.is_some(),
            "roomsync server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("roomsync server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    #[test]
    fn server_construction() {
        let server = RoomSyncServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(server.config().data_root, PathBuf::from("data"));
    }

    #[test]
    fn router_builds() {
        let server = RoomSyncServer::new(ServerConfig::default());
        let _router = server.router();
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            data_root: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        RoomSyncServer::new(config)
            .serve_with_shutdown(async {})
            .await
            .unwrap();
    }
}
