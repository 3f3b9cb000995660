//! Outstanding verification bookkeeping

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Identifies one issued verification request.
///
/// Ids increase monotonically per form, so a newer request always has a
/// larger id than the one it superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub(crate) u64);

/// Counts verification work that has not settled yet.
///
/// Each debouncing or in-flight request slot holds a [`PendingGuard`]; the
/// count drops when the slot is settled, superseded or cancelled.
#[derive(Debug, Clone, Default)]
pub struct PendingTracker {
    inner: Arc<TrackerInner>,
}

#[derive(Debug, Default)]
struct TrackerInner {
    count: AtomicUsize,
    idle: Notify,
}

impl PendingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one unit of outstanding work.
    pub fn enter(&self) -> PendingGuard {
        self.inner.count.fetch_add(1, Ordering::SeqCst);
        PendingGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of unsettled verifications.
    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::SeqCst)
    }

    /// Waits until no verification is outstanding.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            // Register before reading the count so a drop in between still wakes us.
            notified.as_mut().enable();
            if self.count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Releases one unit of outstanding work when dropped.
#[derive(Debug)]
pub struct PendingGuard {
    inner: Arc<TrackerInner>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.inner.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

/// The live request slot of one (field, check) pair.
#[derive(Debug)]
pub struct PendingVerification {
    pub request: RequestId,
    pub cancel: CancellationToken,
    pub handle: Option<JoinHandle<()>>,
    pub(crate) _guard: PendingGuard,
}

impl PendingVerification {
    /// Cancels the request, aborts its task and releases its count.
    pub fn abort(self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_guard_counts() {
        let tracker = PendingTracker::new();
        let a = tracker.enter();
        let b = tracker.enter();
        assert_eq!(tracker.count(), 2);
        drop(a);
        assert_eq!(tracker.count(), 1);
        drop(b);
        assert_eq!(tracker.count(), 0);
    }

    #[tokio::test]
    async fn test_wait_idle_returns_immediately_when_idle() {
        let tracker = PendingTracker::new();
        tokio::time::timeout(Duration::from_millis(50), tracker.wait_idle())
            .await
            .expect("idle tracker should not block");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_idle_wakes_on_last_guard() {
        let tracker = PendingTracker::new();
        let guard = tracker.enter();

        let waiter = tokio::spawn({
            let tracker = tracker.clone();
            async move { tracker.wait_idle().await }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
        assert_eq!(tracker.count(), 0);
    }
}
