use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// Credential material presented with a request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Parse an `Authorization` header value.
    ///
    /// `None` means the header was absent. Only the `Bearer` scheme is
    /// understood; anything else is malformed.
    pub fn from_header(value: Option<&[u8]>) -> ProtocolResult<Self> {
        let Some(raw) = value else {
            return Ok(Self::Anonymous);
        };
        let text = std::str::from_utf8(raw)
            .map_err(|_| ProtocolError::MalformedCredentials("header is not UTF-8".into()))?;
        if !text.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
            return Err(ProtocolError::MalformedCredentials(
                "header contains non-printable characters".into(),
            ));
        }
        let (scheme, rest) = text.split_once(' ').unwrap_or((text, ""));
        if scheme != "Bearer" {
            return Err(ProtocolError::MalformedCredentials(format!(
                "unsupported scheme: {scheme}"
            )));
        }
        let token = rest.trim();
        if token.is_empty() {
            return Err(ProtocolError::MalformedCredentials("empty bearer token".into()));
        }
        Ok(Self::Bearer(token.to_string()))
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}

// Tokens never appear in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => write!(f, "Bearer(..)"),
            Self::Anonymous => write!(f, "Anonymous"),
        }
    }
}

/// What an operation does to server state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verb {
    /// Listing, probing, fetching.
    Read,
    /// Creating, uploading, deleting.
    Write,
}

impl Verb {
    /// Classify an HTTP method name.
    pub fn from_method(method: &str) -> Self {
        match method {
            "GET" | "HEAD" | "OPTIONS" => Self::Read,
            _ => Self::Write,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_anonymous() {
        let c = Credentials::from_header(None).unwrap();
        assert_eq!(c, Credentials::Anonymous);
        assert!(!c.is_authenticated());
    }

    #[test]
    fn bearer_token_parsed() {
        let c = Credentials::from_header(Some(b"Bearer s3cret".as_slice())).unwrap();
        assert_eq!(c, Credentials::Bearer("s3cret".into()));
        assert!(c.is_authenticated());
    }

    #[test]
    fn malformed_headers() {
        assert!(Credentials::from_header(Some(b"Bearer".as_slice())).is_err());
        assert!(Credentials::from_header(Some(b"Bearer   ".as_slice())).is_err());
        assert!(Credentials::from_header(Some(b"Basic dXNlcjpwYXNz".as_slice())).is_err());
        assert!(Credentials::from_header(Some([0xffu8, 0xfe].as_slice())).is_err());
        assert!(Credentials::from_header(Some(b"Bearer a\tb".as_slice())).is_err());
    }

    #[test]
    fn debug_hides_token() {
        let c = Credentials::Bearer("s3cret".into());
        assert!(!format!("{c:?}").contains("s3cret"));
    }

    #[test]
    fn verbs_from_methods() {
        assert_eq!(Verb::from_method("GET"), Verb::Read);
        assert_eq!(Verb::from_method("HEAD"), Verb::Read);
        assert_eq!(Verb::from_method("POST"), Verb::Write);
        assert_eq!(Verb::from_method("DELETE"), Verb::Write);
        assert_eq!(Verb::Write.to_string(), "write");
    }
}
