use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roomsync_protocol::{ErrorBody, ProtocolError};
use roomsync_sync::SyncError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("no such route: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("authorization denied: {verb}")]
    Unauthorized { verb: String },

    #[error("access gate fault: {0}")]
    GateFault(String),

    #[error("access gate fault: {0}")]
    Credentials(#[from] ProtocolError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// The one status code this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Sync(e) => match e {
                SyncError::InvalidProjectName { .. } | SyncError::InvalidExtension { .. } => {
                    StatusCode::BAD_REQUEST
                }
                SyncError::ProjectNotFound(_)
                | SyncError::ArtifactNotFound { .. }
                | SyncError::UnreadableContent(_) => StatusCode::NOT_FOUND,
                SyncError::Conflict(_) => StatusCode::CONFLICT,
                SyncError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(e) => e.status(),
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::GateFault(_)
            | Self::Credentials(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorBody::new(status.as_u16(), self.to_string()))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
