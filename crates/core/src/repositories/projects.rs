//! Project store.
//!
//! A project is a directory holding a description and, optionally, a logo:
//!
//! ```text
//! projects/
//!   <id>/
//!     description.md
//!     logo.png
//! ```
//!
//! The directory is the record. Creation must make it fresh, updates require it to exist, and
//! deletion removes it recursively. Uploaded images are always stored as `logo.png` whatever
//! their original name, and the temporary upload is consumed by the operation that receives it.
//!
//! Image URLs are derived by convention (`<base>/projects/<id>/logo.png`) without checking the
//! logo exists, so a project without a logo still reports a URL.

use crate::config::CoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::paths::projects::{logo_url, project_dir, DescriptionFile, LogoFile};
use crate::repositories::shared::{map_not_found, require, require_id};
use crate::storage::Filesystem;
use crate::upload::TempUpload;
use folio_types::ResourceId;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A project as reported to clients.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Project {
    pub id: ResourceId,
    pub description: String,
    pub image_url: String,
}

/// Maps project identifiers onto directories under the projects root.
#[derive(Clone, Debug)]
pub struct ProjectStore {
    fs: Arc<dyn Filesystem>,
    root: PathBuf,
    image_base_url: String,
}

impl ProjectStore {
    pub fn new(fs: Arc<dyn Filesystem>, root: PathBuf, image_base_url: impl Into<String>) -> Self {
        Self {
            fs,
            root,
            image_base_url: image_base_url.into(),
        }
    }

    pub fn from_config(fs: Arc<dyn Filesystem>, cfg: &CoreConfig) -> Self {
        Self::new(fs, cfg.projects_dir(), cfg.image_base_url())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists projects in directory enumeration order.
    ///
    /// Directories without a readable UTF-8 `description.md` (partially created or damaged
    /// projects) are skipped with a warning, as are plain files in the projects root.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the projects root or a description cannot be read.
    pub fn list(&self) -> StoreResult<Vec<Project>> {
        let entries = self
            .fs
            .read_dir(&self.root)
            .map_err(|e| StoreError::io(&self.root, e))?;

        let mut projects = Vec::with_capacity(entries.len());
        for entry in entries.into_iter().filter(|e| e.is_dir) {
            let id = match ResourceId::parse(&entry.name) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("skipping project directory {}: {}", entry.name, e);
                    continue;
                }
            };

            let path = project_dir(&self.root, &id).join(DescriptionFile::NAME);
            match self.fs.read_to_string(&path) {
                Ok(description) => projects.push(self.project(id, description)),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!("project {} has no {}; skipping", id, DescriptionFile::NAME);
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    tracing::warn!("project {} description is not UTF-8; skipping", id);
                }
                Err(e) => return Err(StoreError::io(path, e)),
            }
        }

        Ok(projects)
    }

    /// Reads a project's description and derives its image URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the project directory or its description is
    /// missing.
    pub fn get(&self, id: &ResourceId) -> StoreResult<Project> {
        let path = project_dir(&self.root, id).join(DescriptionFile::NAME);
        let description = self
            .fs
            .read_to_string(&path)
            .map_err(|e| map_not_found(&path, e, || missing(id)))?;

        Ok(self.project(id.clone(), description))
    }

    /// Creates a new project directory with its description and optional logo.
    ///
    /// The directory must not exist yet. If anything after directory creation fails, the
    /// directory is removed again so no half-made project is left behind.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - `id` or `description` is missing or empty ([`StoreError::Validation`]); nothing is
    ///   created,
    /// - `id` is not a safe identifier ([`StoreError::InvalidId`]),
    /// - the project already exists ([`StoreError::Conflict`]); existing files are untouched,
    /// - a write fails ([`StoreError::Io`]), or rollback of the new directory also fails
    ///   ([`StoreError::CleanupAfterCreateFailed`]).
    pub fn create(
        &self,
        id: Option<&str>,
        description: Option<&str>,
        image: Option<TempUpload>,
    ) -> StoreResult<Project> {
        let id = require_id(id)?;
        let description = require(description, "description")?;

        let dir = project_dir(&self.root, &id);
        self.fs.create_dir(&dir).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                StoreError::Conflict(format!("project '{id}' already exists"))
            } else {
                StoreError::io(&dir, e)
            }
        })?;

        if let Err(create_error) = self.populate(&id, &dir, description, image) {
            return Err(self.rollback(&dir, create_error));
        }

        tracing::info!("project {} created", id);
        Ok(self.project(id, description.to_string()))
    }

    /// Stores `image` as the project's logo, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if `id` or `image` is missing and
    /// [`StoreError::NotFound`] if the project does not exist.
    pub fn add_image(&self, id: Option<&str>, image: Option<TempUpload>) -> StoreResult<()> {
        let id = require_id(id)?;
        let Some(image) = image else {
            return Err(StoreError::Validation("image is required".into()));
        };

        let dir = project_dir(&self.root, &id);
        if !self.fs.is_dir(&dir) {
            return Err(StoreError::NotFound(missing(&id)));
        }

        self.store_logo(&id, &dir, image)?;
        tracing::info!("project {} logo replaced", id);
        Ok(())
    }

    /// Overwrites an existing project's description and, if given, its logo.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if `id` or `description` is missing,
    /// [`StoreError::NotFound`] if the project directory does not exist and
    /// [`StoreError::Io`] if a write fails.
    pub fn update(
        &self,
        id: Option<&str>,
        description: Option<&str>,
        image: Option<TempUpload>,
    ) -> StoreResult<Project> {
        let id = require_id(id)?;
        let description = require(description, "description")?;

        let dir = project_dir(&self.root, &id);
        if !self.fs.is_dir(&dir) {
            return Err(StoreError::NotFound(missing(&id)));
        }

        self.populate(&id, &dir, description, image)?;

        tracing::info!("project {} updated", id);
        Ok(self.project(id, description.to_string()))
    }

    /// Removes the project directory and everything in it.
    ///
    /// An already absent project counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for failures other than the directory being absent.
    pub fn delete(&self, id: &ResourceId) -> StoreResult<ResourceId> {
        let dir = project_dir(&self.root, id);
        match self.fs.remove_dir_all(&dir) {
            Ok(()) => tracing::info!("project {} deleted", id),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("project {} already absent", id);
            }
            Err(e) => return Err(StoreError::io(dir, e)),
        }
        Ok(id.clone())
    }

    fn project(&self, id: ResourceId, description: String) -> Project {
        let image_url = logo_url(&self.image_base_url, &id);
        Project {
            id,
            description,
            image_url,
        }
    }

    fn populate(
        &self,
        id: &ResourceId,
        dir: &Path,
        description: &str,
        image: Option<TempUpload>,
    ) -> StoreResult<()> {
        let path = dir.join(DescriptionFile::NAME);
        self.fs
            .write(&path, description.as_bytes())
            .map_err(|e| map_not_found(&path, e, || missing(id)))?;

        if let Some(image) = image {
            self.store_logo(id, dir, image)?;
        }
        Ok(())
    }

    /// Copies the upload's bytes to `logo.png`, then releases the upload.
    ///
    /// On error the upload is dropped, which removes the temporary file as well.
    fn store_logo(&self, id: &ResourceId, dir: &Path, mut image: TempUpload) -> StoreResult<()> {
        let temp_path = image.path().to_path_buf();
        let bytes = image
            .read_bytes()
            .map_err(|e| StoreError::io(&temp_path, e))?;

        let logo = dir.join(LogoFile::NAME);
        self.fs
            .write(&logo, &bytes)
            .map_err(|e| map_not_found(&logo, e, || missing(id)))?;

        tracing::debug!(
            "stored {} bytes from {} as {}",
            bytes.len(),
            image.original_name().unwrap_or("<unnamed upload>"),
            logo.display()
        );
        image.release();
        Ok(())
    }

    fn rollback(&self, dir: &Path, create_error: StoreError) -> StoreError {
        match self.fs.remove_dir_all(dir) {
            Ok(()) => create_error,
            Err(cleanup_error) => StoreError::CleanupAfterCreateFailed {
                path: dir.to_path_buf(),
                create_error: Box::new(create_error),
                cleanup_error,
            },
        }
    }
}

fn missing(id: &ResourceId) -> String {
    format!("project '{id}' does not exist")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalFs, MemoryFs};
    use std::fs;
    use tempfile::TempDir;

    const ROOT: &str = "/public/projects";

    fn id(s: &str) -> ResourceId {
        ResourceId::parse(s).unwrap()
    }

    fn memory_store() -> (Arc<MemoryFs>, ProjectStore) {
        let memfs = Arc::new(MemoryFs::new());
        memfs.create_dir_all(Path::new(ROOT)).unwrap();
        let store = ProjectStore::new(memfs.clone(), PathBuf::from(ROOT), "");
        (memfs, store)
    }

    fn upload(dir: &Path, name: &str, bytes: &[u8]) -> TempUpload {
        TempUpload::from_bytes_in(dir, Some(name.into()), bytes)
            .expect("upload should be staged")
    }

    fn uploads_left(dir: &Path) -> usize {
        fs::read_dir(dir).map(|it| it.count()).unwrap_or(0)
    }

    #[test]
    fn test_create_without_image_reports_conventional_url() {
        let (memfs, store) = memory_store();

        let project = store
            .create(Some("demo"), Some("A demo"), None)
            .expect("create should succeed");

        assert_eq!(project.id.as_str(), "demo");
        assert_eq!(project.description, "A demo");
        assert_eq!(project.image_url, "/projects/demo/logo.png");
        assert!(memfs.is_file(Path::new("/public/projects/demo/description.md")));
        assert!(!memfs.is_file(Path::new("/public/projects/demo/logo.png")));

        let fetched = store.get(&id("demo")).unwrap();
        assert_eq!(fetched, project);
    }

    #[test]
    fn test_create_requires_description() {
        let (memfs, store) = memory_store();

        for description in [None, Some("")] {
            let err = store
                .create(Some("demo"), description, None)
                .expect_err("create should fail");
            assert!(matches!(err, StoreError::Validation(ref m) if m == "description is required"));
        }

        assert!(!memfs.is_dir(Path::new("/public/projects/demo")));
    }

    #[test]
    fn test_create_requires_id() {
        let (_fs, store) = memory_store();

        let err = store.create(None, Some("text"), None).unwrap_err();

        assert!(matches!(err, StoreError::Validation(ref m) if m == "id is required"));
    }

    #[test]
    fn test_create_rejects_traversal_id() {
        let (memfs, store) = memory_store();

        let err = store.create(Some(".."), Some("evil"), None).unwrap_err();

        assert!(matches!(err, StoreError::InvalidId(_)));
        assert!(!memfs.is_file(Path::new("/public/description.md")));
    }

    #[test]
    fn test_second_create_conflicts_and_keeps_original() {
        let (_fs, store) = memory_store();
        store.create(Some("demo"), Some("first"), None).unwrap();

        let err = store
            .create(Some("demo"), Some("second"), None)
            .expect_err("duplicate create should fail");

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.get(&id("demo")).unwrap().description, "first");
    }

    #[test]
    fn test_create_with_image_normalises_name_and_consumes_upload() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let (memfs, store) = memory_store();

        store
            .create(
                Some("art"),
                Some("Artwork"),
                Some(upload(temp.path(), "photo.JPEG", b"jpeg-bytes")),
            )
            .unwrap();

        assert_eq!(
            memfs
                .read(Path::new("/public/projects/art/logo.png"))
                .unwrap(),
            b"jpeg-bytes"
        );
        let names: Vec<_> = memfs
            .read_dir(Path::new("/public/projects/art"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["description.md", "logo.png"]);
        assert_eq!(uploads_left(temp.path()), 0, "upload should be removed");
    }

    #[test]
    fn test_conflicting_create_still_removes_upload() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let (_fs, store) = memory_store();
        store.create(Some("demo"), Some("first"), None).unwrap();

        let result = store.create(
            Some("demo"),
            Some("second"),
            Some(upload(temp.path(), "x.png", b"x")),
        );

        assert!(result.is_err());
        assert_eq!(uploads_left(temp.path()), 0);
    }

    #[test]
    fn test_add_image_replaces_previous_logo() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let (memfs, store) = memory_store();
        store.create(Some("demo"), Some("A demo"), None).unwrap();

        store
            .add_image(Some("demo"), Some(upload(temp.path(), "one.gif", b"old")))
            .unwrap();
        store
            .add_image(Some("demo"), Some(upload(temp.path(), "two.webp", b"new")))
            .unwrap();

        assert_eq!(
            memfs
                .read(Path::new("/public/projects/demo/logo.png"))
                .unwrap(),
            b"new"
        );
        assert_eq!(uploads_left(temp.path()), 0);
    }

    #[test]
    fn test_add_image_requires_image() {
        let (_fs, store) = memory_store();
        store.create(Some("demo"), Some("A demo"), None).unwrap();

        let err = store.add_image(Some("demo"), None).unwrap_err();

        assert!(matches!(err, StoreError::Validation(ref m) if m == "image is required"));
    }

    #[test]
    fn test_add_image_to_missing_project_is_not_found() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let (memfs, store) = memory_store();

        let err = store
            .add_image(Some("ghost"), Some(upload(temp.path(), "a.png", b"a")))
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(!memfs.is_dir(Path::new("/public/projects/ghost")));
        assert_eq!(uploads_left(temp.path()), 0);
    }

    #[test]
    fn test_update_requires_existing_project() {
        let (memfs, store) = memory_store();

        let err = store.update(Some("ghost"), Some("text"), None).unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(!memfs.is_dir(Path::new("/public/projects/ghost")));
    }

    #[test]
    fn test_update_overwrites_description_and_logo() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let (memfs, store) = memory_store();
        store
            .create(
                Some("demo"),
                Some("v1"),
                Some(upload(temp.path(), "a.png", b"v1-logo")),
            )
            .unwrap();

        let updated = store
            .update(
                Some("demo"),
                Some("v2"),
                Some(upload(temp.path(), "b.png", b"v2-logo")),
            )
            .unwrap();

        assert_eq!(updated.description, "v2");
        assert_eq!(store.get(&id("demo")).unwrap().description, "v2");
        assert_eq!(
            memfs
                .read(Path::new("/public/projects/demo/logo.png"))
                .unwrap(),
            b"v2-logo"
        );
    }

    #[test]
    fn test_update_without_image_keeps_logo() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let (memfs, store) = memory_store();
        store
            .create(
                Some("demo"),
                Some("v1"),
                Some(upload(temp.path(), "a.png", b"logo")),
            )
            .unwrap();

        store.update(Some("demo"), Some("v2"), None).unwrap();

        assert!(memfs.is_file(Path::new("/public/projects/demo/logo.png")));
    }

    #[test]
    fn test_delete_removes_everything_and_is_idempotent() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let (memfs, store) = memory_store();
        store
            .create(
                Some("demo"),
                Some("A demo"),
                Some(upload(temp.path(), "a.png", b"logo")),
            )
            .unwrap();

        assert_eq!(store.delete(&id("demo")).unwrap(), id("demo"));

        assert!(!memfs.is_dir(Path::new("/public/projects/demo")));
        assert!(matches!(
            store.get(&id("demo")),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.delete(&id("demo")).unwrap(), id("demo"));
    }

    #[test]
    fn test_list_skips_partial_projects_and_files() {
        let (memfs, store) = memory_store();
        store.create(Some("good"), Some("fine"), None).unwrap();
        memfs
            .create_dir(Path::new("/public/projects/partial"))
            .unwrap();
        memfs
            .write(Path::new("/public/projects/stray.txt"), b"?")
            .unwrap();

        let projects = store.list().unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id.as_str(), "good");
        assert_eq!(projects[0].image_url, "/projects/good/logo.png");
    }

    #[test]
    fn test_list_skips_binary_description() {
        let (memfs, store) = memory_store();
        store.create(Some("good"), Some("fine"), None).unwrap();
        memfs
            .create_dir(Path::new("/public/projects/broken"))
            .unwrap();
        memfs
            .write(
                Path::new("/public/projects/broken/description.md"),
                &[0xff, 0xfe, 0x00, 0x81],
            )
            .unwrap();

        let projects = store.list().expect("list should succeed");

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id.as_str(), "good");
    }

    #[test]
    fn test_get_partial_project_is_not_found() {
        let (memfs, store) = memory_store();
        memfs
            .create_dir(Path::new("/public/projects/partial"))
            .unwrap();

        assert!(matches!(
            store.get(&id("partial")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_absolute_image_urls_with_base() {
        let memfs = Arc::new(MemoryFs::new());
        memfs.create_dir_all(Path::new(ROOT)).unwrap();
        let store = ProjectStore::new(memfs, PathBuf::from(ROOT), "http://localhost:3020");

        let project = store.create(Some("demo"), Some("A demo"), None).unwrap();

        assert_eq!(
            project.image_url,
            "http://localhost:3020/projects/demo/logo.png"
        );
    }

    /// Delegates to [`MemoryFs`] but refuses to write logos.
    #[derive(Debug, Default)]
    struct LogoRejectingFs(MemoryFs);

    impl Filesystem for LogoRejectingFs {
        fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            self.0.read_to_string(path)
        }
        fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
            if path.ends_with(LogoFile::NAME) {
                return Err(std::io::Error::new(ErrorKind::PermissionDenied, "disk says no"));
            }
            self.0.write(path, contents)
        }
        fn create_dir(&self, path: &Path) -> std::io::Result<()> {
            self.0.create_dir(path)
        }
        fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
            self.0.create_dir_all(path)
        }
        fn remove_file(&self, path: &Path) -> std::io::Result<()> {
            self.0.remove_file(path)
        }
        fn remove_dir_all(&self, path: &Path) -> std::io::Result<()> {
            self.0.remove_dir_all(path)
        }
        fn read_dir(&self, path: &Path) -> std::io::Result<Vec<crate::storage::DirEntry>> {
            self.0.read_dir(path)
        }
        fn is_dir(&self, path: &Path) -> bool {
            self.0.is_dir(path)
        }
        fn is_file(&self, path: &Path) -> bool {
            self.0.is_file(path)
        }
    }

    #[test]
    fn test_failed_create_rolls_back_directory() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let rejecting = Arc::new(LogoRejectingFs::default());
        rejecting.create_dir_all(Path::new(ROOT)).unwrap();
        let store = ProjectStore::new(rejecting.clone(), PathBuf::from(ROOT), "");

        let err = store
            .create(
                Some("demo"),
                Some("A demo"),
                Some(upload(temp.path(), "a.png", b"logo")),
            )
            .expect_err("create should fail when the logo cannot be written");

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!rejecting.is_dir(Path::new("/public/projects/demo")));
        assert_eq!(uploads_left(temp.path()), 0);

        // The id is free again once the failed attempt has been rolled back.
        store.create(Some("demo"), Some("A demo"), None).unwrap();
    }

    #[test]
    fn test_local_fs_create_and_recursive_delete() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("projects");
        let uploads = temp_dir.path().join("uploads");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&uploads).unwrap();
        let store = ProjectStore::new(Arc::new(LocalFs), root.clone(), "");

        store
            .create(
                Some("disk"),
                Some("on disk"),
                Some(upload(&uploads, "pic.svg", b"<svg/>")),
            )
            .unwrap();

        assert_eq!(
            fs::read_to_string(root.join("disk").join("description.md")).unwrap(),
            "on disk"
        );
        assert_eq!(
            fs::read(root.join("disk").join("logo.png")).unwrap(),
            b"<svg/>"
        );
        assert_eq!(uploads_left(&uploads), 0);

        store.delete(&id("disk")).unwrap();
        assert!(!root.join("disk").exists());
    }
}
