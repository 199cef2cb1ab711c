//! Resource stores.
//!
//! [`ResourceStore`] bundles the post and project stores over one [`Filesystem`] and one
//! [`CoreConfig`], and is what the REST server and CLI hold on to.

pub mod posts;
pub mod projects;
pub mod shared;

use crate::config::CoreConfig;
use crate::error::StoreResult;
use crate::storage::Filesystem;
use posts::PostStore;
use projects::ProjectStore;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ResourceStore {
    posts: PostStore,
    projects: ProjectStore,
}

impl ResourceStore {
    /// Builds both stores, creating their collection roots if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`](crate::StoreError::Io) if a root cannot be created.
    pub fn open(fs: Arc<dyn Filesystem>, cfg: &CoreConfig) -> StoreResult<Self> {
        shared::ensure_collection_roots(fs.as_ref(), cfg)?;
        Ok(Self {
            posts: PostStore::from_config(fs.clone(), cfg),
            projects: ProjectStore::from_config(fs, cfg),
        })
    }

    pub fn posts(&self) -> &PostStore {
        &self.posts
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }
}
