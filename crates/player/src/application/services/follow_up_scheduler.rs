//! Cancellable delayed tasks tied to a client session.
//!
//! Tasks run once after their delay unless the scheduler is cancelled first.
//! Cancelling is permanent: later `schedule` calls are refused.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

#[derive(Clone, Default)]
pub struct FollowUpScheduler {
    token: CancellationToken,
    tracker: TaskTracker,
}

impl FollowUpScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` unless cancelled first.
    ///
    /// Returns false if the task was not scheduled (scheduler cancelled, or no
    /// tokio runtime in the calling context).
    pub fn schedule(&self, delay: Duration, task: impl FnOnce() + Send + 'static) -> bool {
        if self.token.is_cancelled() {
            tracing::debug!("Scheduler cancelled, dropping follow-up");
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("No async runtime available, dropping follow-up");
            return false;
        };

        let token = self.token.clone();
        self.tracker.spawn_on(
            async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("Follow-up cancelled before it fired");
                    }
                    _ = tokio::time::sleep(delay) => task(),
                }
            },
            &runtime,
        );
        true
    }

    /// Number of scheduled tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel every pending task and refuse new ones.
    pub fn cancel_all(&self) {
        self.token.cancel();
    }

    /// Cancel and wait for every task to wind down.
    pub async fn shutdown(&self) {
        self.cancel_all();
        self.tracker.close();
        self.tracker.wait().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_task_fires_after_delay() {
        let scheduler = FollowUpScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        assert!(scheduler.schedule(Duration::from_millis(700), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_millis(699)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_pending_and_future_tasks() {
        let scheduler = FollowUpScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        scheduler.schedule(Duration::from_millis(700), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        scheduler.cancel_all();

        let counter = Arc::clone(&fired);
        assert!(!scheduler.schedule(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(scheduler.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_waits_for_tasks() {
        let scheduler = FollowUpScheduler::new();
        scheduler.schedule(Duration::from_secs(60), || {});
        assert_eq!(scheduler.pending(), 1);

        scheduler.shutdown().await;
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_schedule_without_runtime_is_refused() {
        let scheduler = FollowUpScheduler::new();
        assert!(!scheduler.schedule(Duration::from_millis(1), || {}));
    }
}
