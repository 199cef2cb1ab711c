//! Project directory layout.
//!
//! ```text
//! projects/
//!   <id>/
//!     description.md
//!     logo.png        # optional
//! ```

use crate::constants::PROJECTS_DIR_NAME;
use folio_types::ResourceId;
use std::path::{Path, PathBuf};

/// Project description filename.
pub struct DescriptionFile;

impl DescriptionFile {
    pub const NAME: &'static str = "description.md";
}

/// Normalised logo filename; every uploaded image is stored under this name.
pub struct LogoFile;

impl LogoFile {
    pub const NAME: &'static str = "logo.png";
}

/// `<projects_root>/<id>/`
pub fn project_dir(projects_root: &Path, id: &ResourceId) -> PathBuf {
    projects_root.join(id.as_str())
}

/// `<base>/projects/<id>/logo.png`, derived without checking the logo exists.
pub fn logo_url(base_url: &str, id: &ResourceId) -> String {
    format!(
        "{}/{}/{}/{}",
        base_url,
        PROJECTS_DIR_NAME,
        id.as_str(),
        LogoFile::NAME
    )
}
