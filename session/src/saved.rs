use crate::executor::SearchExecutor;
use crate::executor::SearchOutcome;
use crate::executor::SearchQuery;
use searchlight_async_utils::ScheduledTask;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

/// Keeps a stored query fresh by re-running it on a fixed interval.
///
/// The first search runs as soon as the runner starts. Outcomes, failures
/// included, arrive on the returned receiver. Stopping or dropping the
/// runner cancels the timer and any search in flight; so does dropping the
/// receiver.
#[derive(Debug)]
pub struct SavedSearch {
    query: SearchQuery,
    task: ScheduledTask,
}

impl SavedSearch {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

    pub fn start(
        query: SearchQuery,
        executor: Arc<dyn SearchExecutor>,
        interval: Duration,
    ) -> (Self, UnboundedReceiver<SearchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut task = ScheduledTask::new();
        let stored = query.clone();
        task.spawn(async move {
            // tokio rejects a zero period.
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::trace!(query_pattern = %stored.request.query_pattern, "rerunning saved search");
                let outcome = SearchOutcome::from(executor.search(stored.clone()).await);
                if tx.send(outcome).is_err() {
                    tracing::debug!("saved search receiver dropped");
                    break;
                }
            }
        });
        (Self { query, task }, rx)
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn is_running(&self) -> bool {
        self.task.is_pending()
    }

    /// Stops re-running. Returns whether the runner was still active.
    pub fn stop(&mut self) -> bool {
        self.task.cancel()
    }
}
