use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{AccessGate, AllowAll, BearerTokenGate};
use crate::error::{ServerError, ServerResult};

/// Server configuration.
///
/// Loaded once at startup and passed explicitly; the data root is injected
/// into the project store when the server is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding one subdirectory per project.
    pub data_root: PathBuf,
    /// Largest accepted request body, in bytes.
    pub max_upload_size: usize,
    /// When set, writes require `Authorization: Bearer <auth_token>`.
    pub auth_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            data_root: PathBuf::from("data"),
            max_upload_size: 64 * 1024 * 1024,
            auth_token: None,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// The access gate selected by this configuration.
    pub fn access_gate(&self) -> Arc<dyn AccessGate> {
        match &self.auth_token {
            Some(token) => Arc::new(BearerTokenGate::new(token.clone())),
            None => Arc::new(AllowAll),
        }
    }
}
