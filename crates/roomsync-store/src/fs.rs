use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use roomsync_types::ArtifactKind;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::names::validate_project_name;
use crate::traits::ProjectStore;

/// Filesystem-backed project store.
///
/// On-disk layout:
/// ```text
/// <root>/<project>/roomModelData.mef
/// <root>/<project>/positioningPersistence.xml
/// ```
///
/// There is no manifest or index: the existence and content of these files
/// is the entire durable state. The root directory is created lazily on the
/// first write.
#[derive(Clone, Debug)]
pub struct FsProjectStore {
    root: PathBuf,
}

impl FsProjectStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_dir(&self, name: &str) -> StoreResult<PathBuf> {
        validate_project_name(name)?;
        Ok(self.root.join(name))
    }

    fn artifact_path(&self, project: &str, kind: ArtifactKind) -> StoreResult<PathBuf> {
        Ok(self.project_dir(project)?.join(kind.file_name()))
    }
}

impl ProjectStore for FsProjectStore {
    fn list_projects(&self) -> StoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            // Names that are not valid UTF-8 cannot have been created through
            // this store.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn create_project(&self, name: &str) -> StoreResult<()> {
        let dir = self.project_dir(name)?;
        fs::create_dir_all(&self.root)?;
        // `create_dir` (not `_all`) so an existing entry is reported atomically.
        match fs::create_dir(&dir) {
            Ok(()) => {
                debug!(project = name, path = %dir.display(), "project directory created");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::ProjectExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete_project(&self, name: &str) -> StoreResult<()> {
        let dir = self.project_dir(name)?;
        if !dir.is_dir() {
            return Err(StoreError::ProjectNotFound(name.to_string()));
        }
        fs::remove_dir_all(&dir)?;
        debug!(project = name, path = %dir.display(), "project directory removed");
        Ok(())
    }

    fn project_exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.project_dir(name)?.is_dir())
    }

    fn read_artifact(&self, project: &str, kind: ArtifactKind) -> StoreResult<Vec<u8>> {
        let path = self.artifact_path(project, kind)?;
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.project_exists(project)? {
                    Err(StoreError::ArtifactNotFound {
                        project: project.to_string(),
                        kind,
                    })
                } else {
                    Err(StoreError::ProjectNotFound(project.to_string()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_artifact(&self, project: &str, kind: ArtifactKind, data: &[u8]) -> StoreResult<()> {
        let dir = self.project_dir(project)?;
        fs::create_dir_all(&dir)?;

        // Write into a sibling temp file, then rename over the canonical
        // name: readers see either the old or the new content, never a mix.
        let mut tmp = tempfile::Builder::new()
            .prefix(".upload-")
            .tempfile_in(&dir)?;
        tmp.write_all(data)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;

        let path = dir.join(kind.file_name());
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(project, %kind, bytes = data.len(), path = %path.display(), "artifact written");
        Ok(())
    }

    fn artifact_kinds(&self, project: &str) -> StoreResult<Vec<ArtifactKind>> {
        let dir = self.project_dir(project)?;
        if !dir.is_dir() {
            return Err(StoreError::ProjectNotFound(project.to_string()));
        }
        let mut kinds = Vec::new();
        for kind in ArtifactKind::ALL {
            match fs::metadata(dir.join(kind.file_name())) {
                Ok(meta) if meta.is_file() => kinds.push(kind),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(kinds)
    }
}
