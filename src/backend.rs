use crate::document::IndexRequest;
use async_trait::async_trait;
use std::error::Error;

/// Error type used at the backend seam.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// The narrow contract the hook requires of an indexing backend.
///
/// Implementations own connection handling and transport (HTTP, etc). The
/// hook calls `index_exists`/`create_index` once during construction and
/// `bulk` from its background dispatcher task; nothing here is ever awaited
/// on an application thread.
#[async_trait]
pub trait IndexBackend: Send + Sync {
    /// Check whether `index` exists on the backend.
    ///
    /// **Returns**
    /// - `Ok(true)` / `Ok(false)` according to the backend.
    /// - `Err(..)` on any transport or backend failure.
    async fn index_exists(&self, index: &str) -> Result<bool, BoxError>;

    /// Create `index` on the backend.
    ///
    /// **Returns**
    /// - `Ok(true)` if the backend acknowledged the creation.
    /// - `Ok(false)` if the backend answered but did not acknowledge.
    /// - `Err(..)` on any transport or backend failure.
    async fn create_index(&self, index: &str) -> Result<bool, BoxError>;

    /// Deliver a batch of index requests.
    ///
    /// **Parameters**
    /// - `requests`: the buffered documents, in enqueue order. Requests in
    ///   one batch may target different indices.
    ///
    /// **Returns**
    /// - `Ok(())` if the backend accepted the whole batch.
    /// - `Err(..)` if delivery failed. The dispatcher does not retry; the
    ///   batch is dropped and the failure reported.
    async fn bulk(&self, requests: &[IndexRequest]) -> Result<(), BoxError>;
}
