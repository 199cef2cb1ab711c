//! HTTP handlers, one module per resource collection.

pub mod posts;
pub mod projects;

use crate::error::ApiError;
use folio_core::StoreResult;

/// Runs a store operation on the blocking pool.
///
/// Store calls are plain filesystem I/O, so they must not run on the async workers.
pub(crate) async fn run_blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
        .map_err(ApiError::from)
}
