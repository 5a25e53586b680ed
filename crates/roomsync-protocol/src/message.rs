use serde::{Deserialize, Serialize};
use roomsync_types::{ArtifactKind, Fingerprint};

/// JSON body of every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// JSON body of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub project: String,
    pub kind: ArtifactKind,
    pub size: u64,
    pub fingerprint: Fingerprint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_json_shape() {
        let body = ErrorBody::new(404, "project not found: ghost");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 404);
        assert_eq!(json["message"], "project not found: ghost");
    }

    #[test]
    fn upload_response_json_shape() {
        let resp = UploadResponse {
            project: "siteA".into(),
            kind: ArtifactKind::RoomModel,
            size: 1,
            fingerprint: Fingerprint::from_hash([0xab; 32]),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["kind"], "room_model");
        assert_eq!(json["fingerprint"], "ab".repeat(32));
    }
}
