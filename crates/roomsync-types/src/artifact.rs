use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One of the two artifacts a project can hold.
///
/// Each kind occupies exactly one fixed file name inside its project
/// directory; uploading a new one overwrites the old content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// The room model (`.mef`).
    RoomModel,
    /// The positioning persistence file (`.xml`).
    Positioning,
}

impl ArtifactKind {
    /// Both kinds, in storage order.
    pub const ALL: [ArtifactKind; 2] = [Self::RoomModel, Self::Positioning];

    /// File name the artifact is stored under inside its project directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::RoomModel => "roomModelData.mef",
            Self::Positioning => "positioningPersistence.xml",
        }
    }

    /// Extension an uploaded file name must carry, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::RoomModel => "mef",
            Self::Positioning => "xml",
        }
    }

    /// Path segment that names this kind on the wire.
    pub fn route_segment(&self) -> &'static str {
        match self {
            Self::RoomModel => "mef",
            Self::Positioning => "positioning",
        }
    }

    /// Media type used when the artifact is transferred.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::RoomModel => "application/mef",
            Self::Positioning => "application/xml",
        }
    }

    /// The kind whose required extension is `ext`, if any.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.extension() == ext)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomModel => write!(f, "room-model"),
            Self::Positioning => write!(f, "positioning"),
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = TypeError;

    /// Parses a route segment (`mef`, `positioning`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mef" => Ok(Self::RoomModel),
            "positioning" => Ok(Self::Positioning),
            other => Err(TypeError::UnknownArtifactKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_file_names() {
        assert_eq!(ArtifactKind::RoomModel.file_name(), "roomModelData.mef");
        assert_eq!(ArtifactKind::Positioning.file_name(), "positioningPersistence.xml");
    }

    #[test]
    fn file_names_carry_their_extension() {
        for kind in ArtifactKind::ALL {
            assert!(kind.file_name().ends_with(&format!(".{}", kind.extension())));
        }
    }

    #[test]
    fn from_extension_is_exact() {
        assert_eq!(ArtifactKind::from_extension("mef"), Some(ArtifactKind::RoomModel));
        assert_eq!(ArtifactKind::from_extension("xml"), Some(ArtifactKind::Positioning));
        assert_eq!(ArtifactKind::from_extension("MEF"), None);
        assert_eq!(ArtifactKind::from_extension("txt"), None);
    }

    #[test]
    fn parse_route_segments() {
        for kind in ArtifactKind::ALL {
            assert_eq!(kind.route_segment().parse::<ArtifactKind>().unwrap(), kind);
        }
        assert!("room-model".parse::<ArtifactKind>().is_err());
        assert!(matches!(
            "xml".parse::<ArtifactKind>(),
            Err(TypeError::UnknownArtifactKind(_))
        ));
    }

    #[test]
    fn display_names() {
        assert_eq!(ArtifactKind::RoomModel.to_string(), "room-model");
        assert_eq!(ArtifactKind::Positioning.to_string(), "positioning");
    }
}
