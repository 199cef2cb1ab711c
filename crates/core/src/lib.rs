//! # Folio Core
//!
//! Core logic for the Folio content store: the mapping between resource identifiers and the
//! files and directories that hold them.
//!
//! This crate contains pure data operations and file/folder management:
//! - Posts stored as `<public>/posts/<id>.md`
//! - Projects stored as `<public>/projects/<id>/{description.md,logo.png}`
//! - Ownership of temporary uploads until they are copied into place
//!
//! **No API concerns**: HTTP servers, multipart parsing and response shapes belong in
//! `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod paths;
pub mod repositories;
pub mod storage;
pub mod upload;

pub use config::{CoreConfig, DeploymentMode};
pub use error::{StoreError, StoreResult};
pub use folio_types::{IdError, ResourceId};
pub use repositories::posts::{Post, PostStore};
pub use repositories::projects::{Project, ProjectStore};
pub use repositories::ResourceStore;
pub use storage::{Filesystem, LocalFs, MemoryFs};
pub use upload::TempUpload;
