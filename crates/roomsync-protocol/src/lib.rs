//! Wire vocabulary for roomsync.
//!
//! Shared by the server and by clients: endpoint paths, the headers and
//! multipart field used for transfers, request credentials and verbs, and
//! the JSON bodies of responses.

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod message;

pub use auth::{Credentials, Verb};
pub use endpoint::{
    artifact_path, attachment_disposition, check_path, endpoints, fetch_path, HealthResponse,
    FINGERPRINT_HEADER, UPLOAD_FIELD,
};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{ErrorBody, UploadResponse};
