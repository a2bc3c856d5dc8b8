//! Single-flight gating and cancellable background requests.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::{AbortHandle, JoinHandle};

/// Allows at most one in-flight action per owner (a screen, a command).
#[derive(Debug, Clone, Default)]
pub struct ActionGate {
    busy: Arc<AtomicBool>,
}

/// Held while an action runs; dropping it reopens the gate.
#[derive(Debug)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` when an action is already running.
    pub fn try_begin(&self) -> Option<InFlight> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                busy: self.busy.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Spawn `fut` if the gate is free. The gate stays closed until the
    /// task finishes or is cancelled.
    pub fn spawn<F>(&self, fut: F) -> Option<PendingRequest<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let guard = self.try_begin()?;
        Some(PendingRequest::spawn(async move {
            let _guard = guard;
            fut.await
        }))
    }
}

/// A request running on the tokio runtime.
///
/// The owner may await it, abort it, or let it run on without waiting.
#[derive(Debug)]
pub struct PendingRequest<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> PendingRequest<T> {
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(fut),
        }
    }

    /// Abort the request; its result is discarded.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Stop caring about the result; the request still completes.
    pub fn detach(self) {
        drop(self.handle);
    }

    /// Handle that can abort the request while it is being awaited.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result. `None` if the task was aborted or panicked.
    pub async fn wait(self) -> Option<T> {
        match self.handle.await {
            Ok(value) => Some(value),
            Err(e) => {
                if e.is_panic() {
                    tracing::error!("request task panicked: {e}");
                }
                None
            }
        }
    }
}
