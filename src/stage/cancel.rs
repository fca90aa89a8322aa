// ABOUTME: Pipeline-wide cancellation signal and a helper racing runtime calls against it.
// ABOUTME: Cancellation wins ties so no further work starts once it is signaled.

use crate::runtime::RuntimeError;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// A cloneable cancellation signal shared by the coordinator and the runners.
///
/// Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Signal>,
}

#[derive(Debug, Default)]
struct Signal {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every clone of this token.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent cancel is not missed.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Cancel `cancel` on the first interrupt yielded by `interrupt`, then wait
/// for another.
///
/// Returns `true` when a second interrupt arrives and `false` if interrupts
/// cannot be received.
pub async fn cancel_on_interrupts<F, Fut>(cancel: &CancellationToken, mut interrupt: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = interrupt().await {
        tracing::warn!("Cannot listen for interrupts: {e}");
        return false;
    }
    tracing::warn!("Interrupt received, cancelling after current step (interrupt again to exit)");
    cancel.cancel();
    interrupt().await.is_ok()
}

/// Await `operation` unless `cancel` fires first.
///
/// The operation future is dropped on cancellation, which kills any engine
/// process it spawned.
pub async fn until_cancelled<F, T, E>(
    cancel: &CancellationToken,
    operation: F,
) -> Result<T, RuntimeError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<RuntimeError>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RuntimeError::Cancelled),
        result = operation => result.map_err(Into::into),
    }
}
