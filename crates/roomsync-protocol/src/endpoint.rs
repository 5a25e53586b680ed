use roomsync_types::ArtifactKind;

/// HTTP endpoint paths, in axum route syntax.
pub mod endpoints {
    pub const PROJECTS: &str = "/";
    pub const HEALTH: &str = "/v1/health";
    pub const PROJECT: &str = "/:project";
    pub const ARTIFACT: &str = "/:project/:kind";
    pub const ARTIFACT_FETCH: &str = "/:project/:kind/:hash";
    pub const ARTIFACT_CHECK: &str = "/:project/:kind/check/:hash";
}

/// Header carrying the server fingerprint of a transferred or uploaded artifact.
pub const FINGERPRINT_HEADER: &str = "x-roomsync-fingerprint";

/// Multipart form field holding an uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Concrete path of an artifact, e.g. `/siteA/mef`.
pub fn artifact_path(project: &str, kind: ArtifactKind) -> String {
    format!("/{project}/{}", kind.route_segment())
}

/// Concrete conditional-fetch path, e.g. `/siteA/mef/<hash>`.
pub fn fetch_path(project: &str, kind: ArtifactKind, hash: &str) -> String {
    format!("/{project}/{}/{hash}", kind.route_segment())
}

/// Concrete freshness-probe path, e.g. `/siteA/mef/check/<hash>`.
pub fn check_path(project: &str, kind: ArtifactKind, hash: &str) -> String {
    format!("/{project}/{}/check/{hash}", kind.route_segment())
}

/// `Content-Disposition` value naming the artifact's canonical file.
pub fn attachment_disposition(kind: ArtifactKind) -> String {
    format!("attachment; filename={}", kind.file_name())
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
