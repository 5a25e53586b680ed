//! HTTP server for roomsync.
//!
//! Hosts projects over HTTP: clients list and provision projects, upload
//! their room-model and positioning artifacts, and fetch them back only when
//! their cached copy is stale. Every request passes the [`AccessGate`]
//! before it reaches a handler.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use auth::{Access, AccessGate, AllowAll, BearerTokenGate};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::RoomSyncServer;
