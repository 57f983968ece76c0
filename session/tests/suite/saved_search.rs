use crate::suite::support::RecordingExecutor;
use pretty_assertions::assert_eq;
use searchlight_magic_search::SearchRequest;
use searchlight_session::ExecutorError;
use searchlight_session::SavedSearch;
use searchlight_session::SearchQuery;
use searchlight_session::SearchSettings;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn saved_query(pattern: &str) -> SearchQuery {
    let request = SearchRequest {
        query_pattern: pattern.to_string(),
        ..SearchRequest::default()
    };
    SearchQuery::new(request, &SearchSettings::default())
}

#[tokio::test(start_paused = true)]
async fn reruns_stored_query_on_interval() {
    let executor = Arc::new(RecordingExecutor::new());
    let (saved, mut outcomes) = SavedSearch::start(
        saved_query("size=s"),
        executor.clone(),
        SavedSearch::DEFAULT_INTERVAL,
    );
    assert!(saved.is_running());

    for _ in 0..3 {
        let outcome = outcomes.recv().await.unwrap();
        assert!(!outcome.error);
        assert_eq!(outcome.hits.len(), 1);
    }

    let queries = executor.queries().await;
    assert_eq!(queries.len(), 3);
    assert!(queries[1].0 - queries[0].0 >= Duration::from_secs(2));
    assert!(queries[2].0 - queries[1].0 >= Duration::from_secs(2));
    assert_eq!(executor.patterns().await, vec!["size=s"; 3]);
    assert_eq!(saved.query().request.query_pattern, "size=s");
}

#[tokio::test(start_paused = true)]
async fn failures_are_delivered_and_do_not_stop_reruns() {
    let executor = Arc::new(RecordingExecutor::failing(
        ExecutorError::new("unavailable").with_status(503),
    ));
    let (_saved, mut outcomes) =
        SavedSearch::start(saved_query(""), executor, SavedSearch::DEFAULT_INTERVAL);

    let first = outcomes.recv().await.unwrap();
    assert!(first.error);
    assert_eq!(first.status_code, Some(503));
    assert!(outcomes.recv().await.unwrap().error);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_pending_rerun() {
    let executor = Arc::new(RecordingExecutor::new());
    let (mut saved, mut outcomes) = SavedSearch::start(
        saved_query("size=l"),
        executor.clone(),
        SavedSearch::DEFAULT_INTERVAL,
    );
    outcomes.recv().await.unwrap();

    assert!(saved.stop());
    assert!(!saved.is_running());
    sleep(Duration::from_secs(10)).await;
    assert!(outcomes.recv().await.is_none());
    assert_eq!(executor.queries().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_runner_closes_outcomes() {
    let executor = Arc::new(RecordingExecutor::new());
    let (saved, mut outcomes) =
        SavedSearch::start(saved_query(""), executor, Duration::from_secs(5));
    outcomes.recv().await.unwrap();

    drop(saved);
    assert!(outcomes.recv().await.is_none());
}
