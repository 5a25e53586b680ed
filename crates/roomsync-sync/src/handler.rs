use std::sync::Arc;

use roomsync_crypto::ContentHasher;
use roomsync_store::ProjectStore;
use roomsync_types::{ArtifactKind, Fingerprint};
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};
use crate::types::{ArtifactTransfer, FetchOutcome, Freshness, UploadReceipt};

/// Extension of an uploaded file name: the text after the last `.`,
/// provided that dot is not the first character.
///
/// ```
/// use roomsync_sync::handler::file_extension;
///
/// assert_eq!(file_extension("floor.mef"), "mef");
/// assert_eq!(file_extension("a.b.xml"), "xml");
/// assert_eq!(file_extension(".mef"), "");
/// assert_eq!(file_extension("noext"), "");
/// ```
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(i) if i > 0 => &filename[i + 1..],
        _ => "",
    }
}

/// Conditional synchronization over a [`ProjectStore`].
///
/// Read paths recompute the server fingerprint on every call and compare it
/// with the client's token; nothing is cached between calls. Uploads are
/// last-writer-wins: no lock is held between extension validation and the
/// write, so two concurrent uploads to the same artifact race and the later
/// one is kept.
pub struct SyncHandler {
    store: Arc<dyn ProjectStore>,
    hasher: ContentHasher,
}

impl SyncHandler {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self {
            store,
            hasher: ContentHasher::ARTIFACT,
        }
    }

    pub fn store(&self) -> &Arc<dyn ProjectStore> {
        &self.store
    }

    /// Names of all projects.
    ///
    /// Listing has no not-found outcome: an unreadable data root is a
    /// storage failure.
    pub fn list_projects(&self) -> SyncResult<Vec<String>> {
        self.store.list_projects().map_err(SyncError::from_write)
    }

    /// Provision an empty project. Fails with `Conflict` if it exists.
    pub fn create_project(&self, project: &str) -> SyncResult<()> {
        self.store
            .create_project(project)
            .map_err(SyncError::from_write)?;
        info!(project, "project created");
        Ok(())
    }

    /// Remove a project and both of its artifacts.
    pub fn remove_project(&self, project: &str) -> SyncResult<()> {
        self.store
            .delete_project(project)
            .map_err(SyncError::from_write)?;
        info!(project, "project removed");
        Ok(())
    }

    /// Current fingerprint of an artifact.
    pub fn fingerprint(&self, project: &str, kind: ArtifactKind) -> SyncResult<Fingerprint> {
        Ok(self.read_current(project, kind)?.1)
    }

    /// Compare `client_token` with the current artifact without sending it.
    pub fn check_freshness(
        &self,
        project: &str,
        kind: ArtifactKind,
        client_token: &str,
    ) -> SyncResult<Freshness> {
        let (_, current) = self.read_current(project, kind)?;
        let freshness = compare(&current, client_token);
        debug!(project, %kind, ?freshness, "freshness probe");
        Ok(freshness)
    }

    /// Return the artifact only if the client's copy is stale.
    pub fn fetch(
        &self,
        project: &str,
        kind: ArtifactKind,
        client_token: &str,
    ) -> SyncResult<FetchOutcome> {
        let (data, fingerprint) = self.read_current(project, kind)?;
        match compare(&fingerprint, client_token) {
            Freshness::Current => {
                debug!(project, %kind, "client copy is current");
                Ok(FetchOutcome::NothingNew)
            }
            Freshness::Stale => {
                debug!(project, %kind, bytes = data.len(), "transferring artifact");
                Ok(FetchOutcome::Transfer(ArtifactTransfer {
                    kind,
                    data,
                    fingerprint,
                }))
            }
        }
    }

    /// Validate and store an uploaded artifact, replacing any previous one.
    ///
    /// The extension of `filename` must equal the kind's required extension
    /// exactly; on mismatch storage is not touched.
    pub fn upload(
        &self,
        project: &str,
        kind: ArtifactKind,
        filename: &str,
        data: &[u8],
    ) -> SyncResult<UploadReceipt> {
        if file_extension(filename) != kind.extension() {
            return Err(SyncError::InvalidExtension {
                filename: filename.to_string(),
                expected: kind.extension(),
            });
        }

        self.store
            .write_artifact(project, kind, data)
            .map_err(SyncError::from_write)?;

        let fingerprint = self.hasher.fingerprint(data);
        info!(project, %kind, bytes = data.len(), fingerprint = %fingerprint.short_hex(), "artifact uploaded");
        Ok(UploadReceipt {
            project: project.to_string(),
            kind,
            size: data.len() as u64,
            fingerprint,
        })
    }

    fn read_current(&self, project: &str, kind: ArtifactKind) -> SyncResult<(Vec<u8>, Fingerprint)> {
        let data = self
            .store
            .read_artifact(project, kind)
            .map_err(SyncError::from_read)?;
        let fingerprint = self.hasher.fingerprint(&data);
        Ok((data, fingerprint))
    }
}

fn compare(current: &Fingerprint, client_token: &str) -> Freshness {
    if current.matches_token(client_token) {
        Freshness::Current
    } else {
        Freshness::Stale
    }
}

impl std::fmt::Debug for SyncHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncHandler")
            .field("domain", &self.hasher.domain())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomsync_store::{FsProjectStore, InMemoryProjectStore};

    fn handler() -> SyncHandler {
        SyncHandler::new(Arc::new(InMemoryProjectStore::new()))
    }

    fn token(data: &[u8]) -> String {
        ContentHasher::ARTIFACT.fingerprint(data).to_hex()
    }

    #[test]
    fn extension_parsing() {
        assert_eq!(file_extension("model.mef"), "mef");
        assert_eq!(file_extension("model.MEF"), "MEF");
        assert_eq!(file_extension("archive.tar.xml"), "xml");
        assert_eq!(file_extension("trailing."), "");
        assert_eq!(file_extension(".xml"), "");
        assert_eq!(file_extension(""), "");
    }

    #[test]
    fn site_scenario() {
        let h = handler();
        h.create_project("siteA").unwrap();
        h.upload("siteA", ArtifactKind::RoomModel, "floor.mef", b"X").unwrap();

        assert_eq!(
            h.check_freshness("siteA", ArtifactKind::RoomModel, "").unwrap(),
            Freshness::Stale
        );
        assert_eq!(
            h.check_freshness("siteA", ArtifactKind::RoomModel, &token(b"X")).unwrap(),
            Freshness::Current
        );
    }

    #[test]
    fn upload_then_fetch_roundtrip() {
        let h = handler();
        let data = b"<positioning><fingerprint/></positioning>".to_vec();
        h.upload("p", ArtifactKind::Positioning, "persist.xml", &data).unwrap();

        match h.fetch("p", ArtifactKind::Positioning, "stale-token").unwrap() {
            FetchOutcome::Transfer(t) => {
                assert_eq!(t.data, data);
                assert_eq!(t.file_name(), "positioningPersistence.xml");
                assert_eq!(t.media_type(), "application/xml");
                assert_eq!(t.fingerprint.to_hex(), token(&data));
            }
            FetchOutcome::NothingNew => panic!("expected a transfer"),
        }
    }

    #[test]
    fn fetch_with_current_token_has_no_body() {
        let h = handler();
        h.upload("p", ArtifactKind::RoomModel, "m.mef", b"model").unwrap();
        let outcome = h.fetch("p", ArtifactKind::RoomModel, &token(b"model")).unwrap();
        assert_eq!(outcome, FetchOutcome::NothingNew);
        assert!(!outcome.has_body());
    }

    #[test]
    fn freshness_is_idempotent() {
        let h = handler();
        h.upload("p", ArtifactKind::RoomModel, "m.mef", b"v1").unwrap();
        let first = h.check_freshness("p", ArtifactKind::RoomModel, "abc").unwrap();
        let second = h.check_freshness("p", ArtifactKind::RoomModel, "abc").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn new_upload_makes_old_token_stale() {
        let h = handler();
        h.upload("p", ArtifactKind::RoomModel, "m.mef", b"v1").unwrap();
        let old = token(b"v1");
        h.upload("p", ArtifactKind::RoomModel, "m.mef", b"v2").unwrap();
        assert!(h.check_freshness("p", ArtifactKind::RoomModel, &old).unwrap().is_stale());
    }

    #[test]
    fn wrong_extension_is_rejected_without_writing() {
        let h = handler();
        let err = h.upload("p", ArtifactKind::RoomModel, "model.txt", b"x").unwrap_err();
        assert!(matches!(err, SyncError::InvalidExtension { expected: "mef", .. }));
        assert!(h.list_projects().unwrap().is_empty());
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let h = handler();
        assert!(matches!(
            h.upload("p", ArtifactKind::RoomModel, "model.MEF", b"x"),
            Err(SyncError::InvalidExtension { .. })
        ));
        assert!(matches!(
            h.upload("p", ArtifactKind::Positioning, "model.mef", b"x"),
            Err(SyncError::InvalidExtension { expected: "xml", .. })
        ));
    }

    #[test]
    fn valid_mef_upload_is_fetchable() {
        let h = handler();
        let receipt = h.upload("p", ArtifactKind::RoomModel, "model.mef", b"mef-bytes").unwrap();
        assert_eq!(receipt.size, 9);
        assert_eq!(receipt.fingerprint.to_hex(), token(b"mef-bytes"));
        match h.fetch("p", ArtifactKind::RoomModel, "").unwrap() {
            FetchOutcome::Transfer(t) => assert_eq!(t.data, b"mef-bytes"),
            FetchOutcome::NothingNew => panic!("expected a transfer"),
        }
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let h = handler();
        let err = h.fetch("nowhere", ArtifactKind::RoomModel, "").unwrap_err();
        assert!(matches!(err, SyncError::ProjectNotFound(_)));

        h.create_project("empty").unwrap();
        let err = h.check_freshness("empty", ArtifactKind::Positioning, "").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn create_twice_conflicts() {
        let h = handler();
        h.create_project("alpha").unwrap();
        assert!(matches!(h.create_project("alpha"), Err(SyncError::Conflict(_))));
    }

    #[test]
    fn remove_project_lifecycle() {
        let h = handler();
        assert!(matches!(h.remove_project("ghost"), Err(SyncError::ProjectNotFound(_))));
        h.create_project("empty").unwrap();
        assert_eq!(h.list_projects().unwrap(), vec!["empty"]);
        h.remove_project("empty").unwrap();
        assert!(h.list_projects().unwrap().is_empty());
    }

    #[test]
    fn invalid_project_name_is_reported() {
        let h = handler();
        assert!(matches!(
            h.upload("../escape", ArtifactKind::RoomModel, "m.mef", b"x"),
            Err(SyncError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn works_over_filesystem_store() {
        let dir = tempfile::tempdir().unwrap();
        let h = SyncHandler::new(Arc::new(FsProjectStore::new(dir.path())));
        h.create_project("siteA").unwrap();
        h.upload("siteA", ArtifactKind::RoomModel, "floor.mef", b"X").unwrap();
        assert!(dir.path().join("siteA/roomModelData.mef").is_file());
        assert_eq!(
            h.check_freshness("siteA", ArtifactKind::RoomModel, &token(b"X")).unwrap(),
            Freshness::Current
        );
        assert_eq!(h.fingerprint("siteA", ArtifactKind::RoomModel).unwrap().to_hex(), token(b"X"));
    }

    #[test]
    fn unreadable_data_root_fails_listing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::write(&root, b"not a directory").unwrap();
        let h = SyncHandler::new(Arc::new(FsProjectStore::new(root)));
        let err = h.list_projects().unwrap_err();
        assert!(matches!(err, SyncError::StorageFailure(_)));
        assert!(!err.is_not_found());
    }
}
