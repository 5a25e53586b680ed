//! Project storage for roomsync.
//!
//! A project is a named directory under the data root holding at most two
//! artifacts, each under a fixed file name:
//!
//! ```text
//! <data_root>/<project>/roomModelData.mef
//! <data_root>/<project>/positioningPersistence.xml
//! ```
//!
//! # Storage Backends
//!
//! All backends implement the [`ProjectStore`] trait:
//!
//! - [`FsProjectStore`] -- directory-per-project store used by the server
//! - [`InMemoryProjectStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Project names are validated ([`names`]) before any path is formed.
//! 2. Uploads overwrite; the last writer wins.
//! 3. Nothing is cached between calls.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsProjectStore;
pub use memory::InMemoryProjectStore;
pub use names::validate_project_name;
pub use traits::ProjectStore;
