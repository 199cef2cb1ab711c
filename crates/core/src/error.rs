use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required request field was absent or empty.
    #[error("{0}")]
    Validation(String),
    /// Startup configuration could not be resolved.
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    InvalidId(#[from] folio_types::IdError),
    /// The addressed resource does not exist on disk.
    #[error("{0}")]
    NotFound(String),
    /// Creation found the resource already present.
    #[error("{0}")]
    Conflict(String),
    #[error("I/O error at {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "create failed and cleanup also failed (path: {path}): create={create_error}; cleanup={cleanup_error}",
        path = path.display()
    )]
    CleanupAfterCreateFailed {
        path: PathBuf,
        #[source]
        create_error: Box<StoreError>,
        cleanup_error: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_)
                | StoreError::InvalidId(_)
                | StoreError::NotFound(_)
                | StoreError::Conflict(_)
        )
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
