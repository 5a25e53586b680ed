use roomsync_types::ArtifactKind;

use crate::error::StoreResult;

/// Registry of projects and their two artifacts.
///
/// All implementations must satisfy these invariants:
/// - Every operation validates the project name (see
///   [`validate_project_name`](crate::names::validate_project_name)) before
///   touching storage.
/// - A project name and an artifact kind determine exactly one location.
/// - Writes overwrite; there is no versioning.
/// - Nothing is cached: every call observes the current backing state.
/// - All I/O errors are propagated, never retried or ignored.
pub trait ProjectStore: Send + Sync {
    /// Names of all existing projects. Empty if there are none.
    fn list_projects(&self) -> StoreResult<Vec<String>>;

    /// Provision a new, empty project.
    ///
    /// Fails with `ProjectExists` if the name is already taken; re-creating
    /// is not treated as success.
    fn create_project(&self, name: &str) -> StoreResult<()>;

    /// Remove a project and everything in it.
    ///
    /// Fails with `ProjectNotFound` if there is no such project.
    fn delete_project(&self, name: &str) -> StoreResult<()>;

    /// Whether a project of this name exists.
    fn project_exists(&self, name: &str) -> StoreResult<bool>;

    /// Read the stored bytes of an artifact.
    fn read_artifact(&self, project: &str, kind: ArtifactKind) -> StoreResult<Vec<u8>>;

    /// Overwrite an artifact, provisioning the project if it is missing.
    fn write_artifact(&self, project: &str, kind: ArtifactKind, data: &[u8]) -> StoreResult<()>;

    /// Artifact kinds currently present in a project.
    fn artifact_kinds(&self, project: &str) -> StoreResult<Vec<ArtifactKind>>;
}
