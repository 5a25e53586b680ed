use roomsync_types::ArtifactKind;

/// Errors from project store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The project name is not a safe directory segment.
    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// The project directory does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// The project exists but holds no artifact of this kind.
    #[error("{kind} artifact not found in project {project}")]
    ArtifactNotFound { project: String, kind: ArtifactKind },

    /// A project of this name has already been provisioned.
    #[error("project already exists: {0}")]
    ProjectExists(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` if the error means "nothing stored there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_) | Self::ArtifactNotFound { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
