//! Post file naming.

use folio_types::ResourceId;
use std::path::{Path, PathBuf};

/// A post is a single Markdown file named after its identifier.
pub struct PostFile;

impl PostFile {
    pub const EXTENSION: &'static str = "md";

    /// `<posts_root>/<id>.md`
    pub fn path(posts_root: &Path, id: &ResourceId) -> PathBuf {
        posts_root.join(format!("{}.{}", id.as_str(), Self::EXTENSION))
    }

    /// Derives a post id from a file name by dropping its final extension.
    ///
    /// Returns `None` when the remaining stem is not a valid identifier.
    pub fn id_from_file_name(file_name: &str) -> Option<ResourceId> {
        let stem = Path::new(file_name).file_stem()?.to_str()?;
        ResourceId::parse(stem).ok()
    }
}
