use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A slot holding at most one scheduled task.
///
/// Scheduling replaces (and aborts) whatever the slot held before, and
/// dropping the slot aborts the pending task. Must be used from within a
/// tokio runtime.
#[derive(Debug, Default)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay`, cancelling any task already in the slot.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
    }

    /// Runs `task` now, cancelling any task already in the slot.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(task));
    }

    /// Aborts the pending task. Returns whether one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                if was_pending {
                    tracing::trace!("scheduled task cancelled");
                }
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
