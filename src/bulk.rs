use crate::backend::{BoxError, IndexBackend};
use crate::document::IndexRequest;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

enum Command {
    Enqueue(IndexRequest),
    Flush(oneshot::Sender<Result<(), BoxError>>),
}

/// Fully asynchronous batcher behind the hook.
///
/// Requests accumulate in a bounded channel and are delivered by a
/// background task. There is no size or count trigger: only the elapsed
/// flush interval (or an explicit [`flush`](BulkDispatcher::flush)) sends
/// the batch. A failed delivery drops the batch; retry policy, if any,
/// belongs to the backend implementation.
pub(crate) struct BulkDispatcher {
    tx: mpsc::Sender<Command>,
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

impl BulkDispatcher {
    /// Spawn the background task. Minimal thresholds are enforced for
    /// `buffer` and `flush_interval` to avoid degenerate configurations.
    pub(crate) fn spawn(
        backend: Arc<dyn IndexBackend>,
        flush_interval: Duration,
        buffer: usize,
    ) -> Self {
        let buffer = buffer.max(16);
        let flush_interval = if flush_interval < Duration::from_millis(10) {
            Duration::from_millis(10)
        } else {
            flush_interval
        };

        let (tx, mut rx) = mpsc::channel::<Command>(buffer);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut batch: Vec<IndexRequest> = Vec::new();
            let mut ticker = interval(flush_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    cmd = rx.recv() => match cmd {
                        Some(Command::Enqueue(request)) => batch.push(request),
                        Some(Command::Flush(ack)) => {
                            let _ = ack.send(deliver(&*backend, &mut batch).await);
                        }
                        None => break,
                    },
                    _ = ticker.tick() => {
                        if !batch.is_empty() {
                            // Not reported through `tracing`: an event here
                            // would feed back into the hook itself.
                            if let Err(e) = deliver(&*backend, &mut batch).await {
                                eprintln!("error flushing log batch: {}", e);
                            }
                        }
                    }
                }
            }
        });

        BulkDispatcher { tx, cancel, _task: task }
    }

    /// Non-blocking enqueue. Returns `false` if the channel is full or the
    /// dispatcher has stopped.
    pub(crate) fn try_enqueue(&self, request: IndexRequest) -> bool {
        self.tx.try_send(Command::Enqueue(request)).is_ok()
    }

    /// Deliver everything buffered so far, waiting for the result.
    ///
    /// After cancellation this resolves to `Ok(())`: the dispatcher is gone
    /// and whether its last batch was delivered is not observable here.
    pub(crate) async fn flush(&self) -> Result<(), BoxError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).await.is_err() {
            return Ok(());
        }
        match ack_rx.await {
            Ok(result) => result,
            Err(_) => Ok(()),
        }
    }

    /// Stop the background task. Buffered requests may be abandoned; callers
    /// needing delivery guarantees flush first.
    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }
}

async fn deliver(
    backend: &dyn IndexBackend,
    batch: &mut Vec<IndexRequest>,
) -> Result<(), BoxError> {
    if batch.is_empty() {
        return Ok(());
    }
    let result = backend.bulk(batch).await;
    batch.clear();
    result
}
