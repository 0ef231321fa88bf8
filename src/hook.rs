use crate::backend::{BoxError, IndexBackend};
use crate::bulk::BulkDispatcher;
use crate::document::{document_for, IndexRequest, DOCUMENT_TYPE};
use crate::entry::LogEntry;
use crate::level::Severity;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::Duration;

/// Capacity of the dispatcher's command channel.
pub const DEFAULT_CHANNEL_BUFFER: usize = 1024;

/// Errors that can fail hook construction.
///
/// Once a hook is built, forwarding itself is infallible: [`ElasticHook::fire`]
/// never reports an error to the caller.
#[derive(thiserror::Error, Debug)]
pub enum HookError {
    /// The backend answered the create request but did not acknowledge it.
    #[error("cannot create index \"{index}\": creation was not acknowledged")]
    IndexNotAcknowledged { index: String },

    /// Transport or backend failure during index setup.
    #[error("{context} for index \"{index}\": {source}")]
    Backend {
        context: &'static str,
        index: String,
        source: BoxError,
    },
}

/// Forwards log entries to an indexing backend, asynchronously and in
/// batches.
///
/// The hook is constructed once per process against an [`IndexBackend`]; on
/// construction it ensures the target index exists (creating it if absent)
/// and spawns its internal batch dispatcher. Afterwards it is driven per
/// entry via [`fire`](ElasticHook::fire), normally by
/// [`ElasticLayer`](crate::layer::ElasticLayer), and torn down with
/// [`cancel`](ElasticHook::cancel).
pub struct ElasticHook {
    dispatcher: BulkDispatcher,
    host: String,
    index_name: Box<dyn Fn() -> String + Send + Sync>,
    levels: Vec<Severity>,
    /// Total entries fired (before enqueueing).
    pub total_events: AtomicU64,
    /// Successfully enqueued into the dispatcher channel.
    pub enqueued_events: AtomicU64,
    /// Dropped because the channel was full or the dispatcher stopped.
    pub dropped_events: AtomicU64,
}

impl std::fmt::Debug for ElasticHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticHook")
            .field("host", &self.host)
            .field("levels", &self.levels)
            .field("total_events", &self.total_events)
            .field("enqueued_events", &self.enqueued_events)
            .field("dropped_events", &self.dropped_events)
            .finish_non_exhaustive()
    }
}

impl ElasticHook {
    /// Build a hook against an already-configured backend.
    ///
    /// **Parameters**
    /// - `backend`: handle to the indexing backend.
    /// - `host`: source identifier stamped into every document's `Host`
    ///   field.
    /// - `min_level`: least severe level that is still forwarded.
    /// - `index_name`: resolver evaluated once per fired entry, so names may
    ///   rotate (e.g. daily). Must be cheap and safe to call concurrently.
    /// - `flush_interval`: the only automatic delivery trigger; there is no
    ///   size or count threshold.
    ///
    /// **Effects**
    ///
    /// Checks whether the index named by `index_name()` exists and creates
    /// it if not, then spawns the background dispatcher task. Must therefore
    /// run inside a Tokio runtime.
    ///
    /// **Errors**
    ///
    /// [`HookError::IndexNotAcknowledged`] if the backend refused the
    /// create; [`HookError::Backend`] for any transport failure during the
    /// existence check or creation.
    pub async fn new(
        backend: Arc<dyn IndexBackend>,
        host: impl Into<String>,
        min_level: Severity,
        index_name: impl Fn() -> String + Send + Sync + 'static,
        flush_interval: Duration,
    ) -> Result<Self, HookError> {
        let levels = Severity::at_or_above(min_level);

        let index = index_name();
        let exists = backend
            .index_exists(&index)
            .await
            .map_err(|source| HookError::Backend {
                context: "existence check failed",
                index: index.clone(),
                source,
            })?;

        if !exists {
            let acknowledged =
                backend
                    .create_index(&index)
                    .await
                    .map_err(|source| HookError::Backend {
                        context: "creation failed",
                        index: index.clone(),
                        source,
                    })?;
            if !acknowledged {
                return Err(HookError::IndexNotAcknowledged { index });
            }
        }

        let dispatcher = BulkDispatcher::spawn(backend, flush_interval, DEFAULT_CHANNEL_BUFFER);

        Ok(ElasticHook {
            dispatcher,
            host: host.into(),
            index_name: Box::new(index_name),
            levels,
            total_events: AtomicU64::new(0),
            enqueued_events: AtomicU64::new(0),
            dropped_events: AtomicU64::new(0),
        })
    }

    /// Severities this hook forwards, most-severe first.
    ///
    /// Precomputed at construction; allocation-free.
    pub fn levels(&self) -> &[Severity] {
        &self.levels
    }

    /// Translate an entry and enqueue it for delivery.
    ///
    /// Non-blocking: the document is buffered and delivery happens on the
    /// dispatcher's schedule. Cannot fail from the caller's perspective;
    /// log emission must not perturb application control flow, so a full
    /// buffer or stopped dispatcher only increments
    /// [`dropped_events`](ElasticHook::dropped_events).
    pub fn fire(&self, entry: &LogEntry) {
        self.total_events.fetch_add(1, Ordering::Relaxed);

        let request = IndexRequest {
            index: (self.index_name)(),
            doc_type: DOCUMENT_TYPE,
            document: document_for(entry, &self.host),
        };

        if self.dispatcher.try_enqueue(request) {
            self.enqueued_events.fetch_add(1, Ordering::Relaxed);
        } else {
            self.dropped_events.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Deliver all buffered documents now, waiting for the backend's answer.
    ///
    /// For graceful shutdown paths; call before [`cancel`](ElasticHook::cancel)
    /// when delivery of the tail matters.
    pub async fn flush(&self) -> Result<(), BoxError> {
        self.dispatcher.flush().await
    }

    /// Stop the background dispatcher. Does not flush; buffered documents
    /// may be abandoned.
    pub fn cancel(&self) {
        self.dispatcher.cancel();
    }
}
