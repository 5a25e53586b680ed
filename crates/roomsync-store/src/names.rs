//! Project name validation.
//!
//! Project names become a single directory segment under the data root, so
//! they are checked before any path is formed. Valid names:
//! - Must be non-empty and at most [`MAX_PROJECT_NAME_LEN`] bytes
//! - Must only contain ASCII letters, digits, `-`, `_` and `.`
//! - Must not start with `.` (rules out `.`, `..` and hidden entries)

use crate::error::{StoreError, StoreResult};

/// Longest accepted project name, in bytes.
pub const MAX_PROJECT_NAME_LEN: usize = 128;

fn invalid(name: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a project name, returning `Ok(())` if it is a safe path segment.
///
/// # Examples
///
/// ```
/// use roomsync_store::names::validate_project_name;
///
/// assert!(validate_project_name("siteA").is_ok());
/// assert!(validate_project_name("building-2.floor_1").is_ok());
/// assert!(validate_project_name("").is_err());
/// assert!(validate_project_name("../etc").is_err());
/// ```
pub fn validate_project_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(invalid(name, "project name must not be empty"));
    }

    if name.len() > MAX_PROJECT_NAME_LEN {
        return Err(invalid(
            name,
            format!("longer than {MAX_PROJECT_NAME_LEN} bytes"),
        ));
    }

    if name.starts_with('.') {
        return Err(invalid(name, "must not start with '.'"));
    }

    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
    }

    Ok(())
}
