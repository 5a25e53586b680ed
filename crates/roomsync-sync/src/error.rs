use roomsync_store::StoreError;
use roomsync_types::ArtifactKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("{kind} artifact not found in project {project}")]
    ArtifactNotFound { project: String, kind: ArtifactKind },

    #[error("project already exists: {0}")]
    Conflict(String),

    #[error("file {filename:?} must have extension .{expected}")]
    InvalidExtension { filename: String, expected: &'static str },

    #[error("unreadable content: {0}")]
    UnreadableContent(#[source] StoreError),

    #[error("storage failure: {0}")]
    StorageFailure(#[source] StoreError),
}

impl SyncError {
    /// Map a store error raised on a read path.
    ///
    /// I/O faults while reading become `UnreadableContent`.
    pub(crate) fn from_read(err: StoreError) -> Self {
        match err {
            StoreError::Io(_) => Self::UnreadableContent(err),
            other => Self::from_store(other),
        }
    }

    /// Map a store error raised on a write path.
    ///
    /// I/O faults while writing become `StorageFailure`.
    pub(crate) fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::Io(_) => Self::StorageFailure(err),
            other => Self::from_store(other),
        }
    }

    fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::InvalidProjectName { name, reason } => {
                Self::InvalidProjectName { name, reason }
            }
            StoreError::ProjectNotFound(name) => Self::ProjectNotFound(name),
            StoreError::ArtifactNotFound { project, kind } => {
                Self::ArtifactNotFound { project, kind }
            }
            StoreError::ProjectExists(name) => Self::Conflict(name),
            io @ StoreError::Io(_) => Self::StorageFailure(io),
        }
    }

    /// Returns `true` for outcomes the caller should see as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound(_) | Self::ArtifactNotFound { .. } | Self::UnreadableContent(_)
        )
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err() -> StoreError {
        StoreError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
    }

    #[test]
    fn io_on_read_is_unreadable() {
        let err = SyncError::from_read(io_err());
        assert!(matches!(err, SyncError::UnreadableContent(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn io_on_write_is_storage_failure() {
        let err = SyncError::from_write(io_err());
        assert!(matches!(err, SyncError::StorageFailure(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn exists_maps_to_conflict() {
        let err = SyncError::from_write(StoreError::ProjectExists("alpha".into()));
        assert!(matches!(err, SyncError::Conflict(name) if name == "alpha"));
    }

    #[test]
    fn not_found_variants_survive_mapping() {
        assert!(SyncError::from_read(StoreError::ProjectNotFound("p".into())).is_not_found());
        assert!(SyncError::from_read(StoreError::ArtifactNotFound {
            project: "p".into(),
            kind: ArtifactKind::Positioning,
        })
        .is_not_found());
    }

    #[test]
    fn extension_message() {
        let err = SyncError::InvalidExtension { filename: "model.txt".into(), expected: "mef" };
        assert_eq!(err.to_string(), "file \"model.txt\" must have extension .mef");
    }
}
