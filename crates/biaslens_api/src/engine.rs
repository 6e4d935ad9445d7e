use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lens_logging::{lens_debug, lens_error, lens_info};

use crate::{ApiCommand, ApiError, ApiErrorKind, ApiEvent, Backend, RequestId, WorkerStopped};

struct Envelope {
    request_id: RequestId,
    command: ApiCommand,
}

/// Runs backend calls on a private tokio runtime and reports each outcome as
/// an [`ApiEvent`]. Requests run concurrently; events arrive in completion
/// order, each tagged with the command that produced it.
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<Envelope>,
    event_rx: mpsc::Receiver<ApiEvent>,
    next_id: AtomicU64,
}

impl ApiHandle {
    pub fn new(backend: Arc<dyn Backend>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Envelope>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(Envelope {
                request_id,
                command,
            }) = cmd_rx.recv()
            {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                let fallback = command.clone();
                runtime.spawn(async move {
                    let task = tokio::spawn(handle_command(backend, request_id, command));
                    let event = match task.await {
                        Ok(event) => event,
                        Err(err) => {
                            lens_error!("request_id={} ended without an outcome: {}", request_id, err);
                            fallback.failed(
                                request_id,
                                ApiError::new(ApiErrorKind::Worker, err.to_string()),
                            )
                        }
                    };
                    let _ = event_tx.send(event);
                });
            }
            lens_info!("api worker shutting down");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            next_id: AtomicU64::new(0),
        })
    }

    /// Queues `command` and returns the id its event will carry.
    pub fn enqueue(&self, command: ApiCommand) -> RequestId {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        lens_debug!("enqueue request_id={} {:?}", request_id, command);
        let _ = self.cmd_tx.send(Envelope {
            request_id,
            command,
        });
        request_id
    }

    /// Next completed request, if one is ready.
    pub fn try_recv(&self) -> Result<Option<ApiEvent>, WorkerStopped> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerStopped),
        }
    }

    /// Waits up to `timeout` for the next completed request.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ApiEvent>, WorkerStopped> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(WorkerStopped),
        }
    }
}

async fn handle_command(
    backend: Arc<dyn Backend>,
    request_id: RequestId,
    command: ApiCommand,
) -> ApiEvent {
    lens_debug!("request_id={} running", request_id);
    match command {
        ApiCommand::SearchPage { query, cursor } => {
            let result = backend.search(&query, cursor).await;
            ApiEvent::SearchPage {
                request_id,
                query,
                cursor,
                result,
            }
        }
        ApiCommand::Analyze { url } => {
            let result = backend.analyze_url(&url).await;
            ApiEvent::Analyzed {
                request_id,
                url,
                result,
            }
        }
        ApiCommand::Extract { url } => {
            let result = backend.extract(&url).await;
            ApiEvent::Extracted {
                request_id,
                url,
                result,
            }
        }
        ApiCommand::Summarize { text } => {
            let result = backend.summarize(&text).await;
            ApiEvent::Summarized { request_id, result }
        }
        ApiCommand::FactCheck { request } => {
            let result = backend.fact_check(&request).await;
            ApiEvent::FactChecked {
                request_id,
                request,
                result,
            }
        }
    }
}
