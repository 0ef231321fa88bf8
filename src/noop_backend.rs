use crate::backend::{BoxError, IndexBackend};
use crate::document::IndexRequest;
use async_trait::async_trait;

/// A backend that accepts and drops everything.
///
/// Useful for measuring the overhead of the hook itself without any
/// external I/O, and for unit tests that don't care about persistence.
#[derive(Clone, Default)]
pub struct NoopBackend;

#[async_trait]
impl IndexBackend for NoopBackend {
    async fn index_exists(&self, _index: &str) -> Result<bool, BoxError> {
        Ok(true)
    }

    async fn create_index(&self, _index: &str) -> Result<bool, BoxError> {
        Ok(true)
    }

    async fn bulk(&self, _requests: &[IndexRequest]) -> Result<(), BoxError> {
        Ok(())
    }
}
