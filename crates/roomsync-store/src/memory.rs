use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use roomsync_types::ArtifactKind;

use crate::error::{StoreError, StoreResult};
use crate::names::validate_project_name;
use crate::traits::ProjectStore;

type Artifacts = HashMap<ArtifactKind, Vec<u8>>;

/// In-memory project store.
///
/// Intended for tests and embedding. Projects are held behind a `RwLock`
/// and artifacts are cloned on read/write. Name validation is identical to
/// the filesystem store so behavior does not depend on the backend.
pub struct InMemoryProjectStore {
    projects: RwLock<BTreeMap<String, Artifacts>>,
}

impl InMemoryProjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of projects currently stored.
    pub fn len(&self) -> usize {
        self.projects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no project exists.
    pub fn is_empty(&self) -> bool {
        self.projects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore for InMemoryProjectStore {
    fn list_projects(&self) -> StoreResult<Vec<String>> {
        let map = self.projects.read().expect("lock poisoned");
        Ok(map.keys().cloned().collect())
    }

    fn create_project(&self, name: &str) -> StoreResult<()> {
        validate_project_name(name)?;
        let mut map = self.projects.write().expect("lock poisoned");
        if map.contains_key(name) {
            return Err(StoreError::ProjectExists(name.to_string()));
        }
        map.insert(name.to_string(), Artifacts::new());
        Ok(())
    }

    fn delete_project(&self, name: &str) -> StoreResult<()> {
        validate_project_name(name)?;
        let mut map = self.projects.write().expect("lock poisoned");
        map.remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::ProjectNotFound(name.to_string()))
    }

    fn project_exists(&self, name: &str) -> StoreResult<bool> {
        validate_project_name(name)?;
        Ok(self.projects.read().expect("lock poisoned").contains_key(name))
    }

    fn read_artifact(&self, project: &str, kind: ArtifactKind) -> StoreResult<Vec<u8>> {
        validate_project_name(project)?;
        let map = self.projects.read().expect("lock poisoned");
        let artifacts = map
            .get(project)
            .ok_or_else(|| StoreError::ProjectNotFound(project.to_string()))?;
        artifacts
            .get(&kind)
            .cloned()
            .ok_or_else(|| StoreError::ArtifactNotFound {
                project: project.to_string(),
                kind,
            })
    }

    fn write_artifact(&self, project: &str, kind: ArtifactKind, data: &[u8]) -> StoreResult<()> {
        validate_project_name(project)?;
        let mut map = self.projects.write().expect("lock poisoned");
        map.entry(project.to_string())
            .or_default()
            .insert(kind, data.to_vec());
        Ok(())
    }

    fn artifact_kinds(&self, project: &str) -> StoreResult<Vec<ArtifactKind>> {
        validate_project_name(project)?;
        let map = self.projects.read().expect("lock poisoned");
        let artifacts = map
            .get(project)
            .ok_or_else(|| StoreError::ProjectNotFound(project.to_string()))?;
        Ok(ArtifactKind::ALL
            .into_iter()
            .filter(|k| artifacts.contains_key(k))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryProjectStore")
            .field("project_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = InMemoryProjectStore::new();
        assert!(store.is_empty());
        assert!(store.list_projects().unwrap().is_empty());
    }

    #[test]
    fn create_twice_conflicts() {
        let store = InMemoryProjectStore::new();
        store.create_project("alpha").unwrap();
        assert!(matches!(
            store.create_project("alpha"),
            Err(StoreError::ProjectExists(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn empty_project_is_listed() {
        let store = InMemoryProjectStore::new();
        store.create_project("empty").unwrap();
        assert_eq!(store.list_projects().unwrap(), vec!["empty"]);
        assert!(store.artifact_kinds("empty").unwrap().is_empty());
    }

    #[test]
    fn write_read_overwrite() {
        let store = InMemoryProjectStore::new();
        store.write_artifact("p", ArtifactKind::RoomModel, b"one").unwrap();
        store.write_artifact("p", ArtifactKind::RoomModel, b"two").unwrap();
        assert_eq!(store.read_artifact("p", ArtifactKind::RoomModel).unwrap(), b"two");
        assert!(matches!(
            store.read_artifact("p", ArtifactKind::Positioning),
            Err(StoreError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn delete_then_missing() {
        let store = InMemoryProjectStore::new();
        store.create_project("p").unwrap();
        store.delete_project("p").unwrap();
        assert!(!store.project_exists("p").unwrap());
        assert!(matches!(
            store.delete_project("p"),
            Err(StoreError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn names_are_validated() {
        let store = InMemoryProjectStore::new();
        assert!(matches!(
            store.write_artifact("../x", ArtifactKind::RoomModel, b""),
            Err(StoreError::InvalidProjectName { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn debug_format() {
        let store = InMemoryProjectStore::new();
        store.create_project("p").unwrap();
        assert!(format!("{store:?}").contains("project_count: 1"));
    }
}
