//! Post store.
//!
//! Each post is one Markdown file in the posts root:
//!
//! ```text
//! posts/
//!   <id>.md
//! ```
//!
//! File presence is the record. Create and update are the same create-or-truncate write; there
//! is no separate existence state to maintain.

use crate::config::CoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::paths::posts::PostFile;
use crate::repositories::shared::map_not_found;
use crate::storage::Filesystem;
use folio_types::ResourceId;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A text post.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Post {
    pub id: ResourceId,
    pub content: String,
}

/// Maps post identifiers onto files in a single directory.
#[derive(Clone, Debug)]
pub struct PostStore {
    fs: Arc<dyn Filesystem>,
    root: PathBuf,
}

impl PostStore {
    pub fn new(fs: Arc<dyn Filesystem>, root: PathBuf) -> Self {
        Self { fs, root }
    }

    pub fn from_config(fs: Arc<dyn Filesystem>, cfg: &CoreConfig) -> Self {
        Self::new(fs, cfg.posts_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists every post in directory enumeration order.
    ///
    /// Subdirectories, names that do not yield a valid identifier and files that are not UTF-8
    /// text (such as a stray `.DS_Store`) are skipped. A file that disappears between
    /// enumeration and reading (a concurrent delete) is skipped as well.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the posts root cannot be read, or if a listed file
    /// cannot be read for any reason other than having been removed.
    pub fn list(&self) -> StoreResult<Vec<Post>> {
        let entries = self
            .fs
            .read_dir(&self.root)
            .map_err(|e| StoreError::io(&self.root, e))?;

        let mut posts = Vec::with_capacity(entries.len());
        for entry in entries.into_iter().filter(|e| !e.is_dir) {
            let Some(id) = PostFile::id_from_file_name(&entry.name) else {
                tracing::warn!("skipping post file with unusable name: {}", entry.name);
                continue;
            };

            let path = self.root.join(&entry.name);
            match self.fs.read_to_string(&path) {
                Ok(content) => posts.push(Post { id, content }),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("post {} vanished during listing", path.display());
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    tracing::warn!("skipping non-UTF-8 file {}", path.display());
                }
                Err(e) => return Err(StoreError::io(path, e)),
            }
        }

        Ok(posts)
    }

    /// Reads `<id>.md`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the post file does not exist.
    pub fn get(&self, id: &ResourceId) -> StoreResult<Post> {
        let path = PostFile::path(&self.root, id);
        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|e| map_not_found(&path, e, || missing(id)))?;

        Ok(Post {
            id: id.clone(),
            content,
        })
    }

    /// Writes `<id>.md`, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the write fails.
    pub fn create(&self, id: ResourceId, content: String) -> StoreResult<Post> {
        let path = PostFile::path(&self.root, &id);
        self.fs
            .write(&path, content.as_bytes())
            .map_err(|e| StoreError::io(&path, e))?;

        tracing::info!("post {} written", id);
        Ok(Post { id, content })
    }

    /// Overwrites `<id>.md`; identical to [`PostStore::create`].
    pub fn update(&self, id: ResourceId, content: String) -> StoreResult<Post> {
        self.create(id, content)
    }

    /// Removes `<id>.md`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the post does not exist, so repeated deletes are
    /// reported rather than silently succeeding.
    pub fn delete(&self, id: &ResourceId) -> StoreResult<ResourceId> {
        let path = PostFile::path(&self.root, id);
        self.fs
            .remove_file(&path)
            .map_err(|e| map_not_found(&path, e, || missing(id)))?;

        tracing::info!("post {} deleted", id);
        Ok(id.clone())
    }
}

fn missing(id: &ResourceId) -> String {
    format!("post '{id}' does not exist")
}
