//! Constants used throughout the Folio core crate.
//!
//! This module contains path, filename and startup defaults so the on-disk layout is defined
//! in one place.

/// Default public directory served to clients and holding both collections.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default directory where multipart uploads are staged before a store takes ownership.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Directory name (under the public directory) for post files.
pub const POSTS_DIR_NAME: &str = "posts";

/// Directory name (under the public directory) for project directories.
///
/// Also the URL segment used when deriving project image URLs.
pub const PROJECTS_DIR_NAME: &str = "projects";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3020;

/// Host used for absolute image URLs in development mode.
pub const DEVELOPMENT_HOST: &str = "http://localhost";

/// Default upper bound for request bodies carrying image uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
