use crate::error::Result;
use crate::error::SessionError;
use crate::error::SettingsError;
use crate::executor::SearchExecutor;
use crate::executor::SearchOutcome;
use crate::executor::SearchQuery;
use crate::settings::SearchSettings;
use searchlight_async_utils::OrCancelExt;
use searchlight_async_utils::ScheduledTask;
use searchlight_magic_search::CompositionEvent;
use searchlight_magic_search::Effect;
use searchlight_magic_search::MagicSearch;
use searchlight_magic_search::SearchRequest;
use searchlight_magic_search::SearchTrigger;
use searchlight_magic_search::Transition;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Requests accepted by a running [`SearchSession`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Input for the search bar.
    Input(CompositionEvent),
    /// Run the last search again (manual refresh).
    RepeatLastSearch,
    /// Cancel the pending polling repeat, if any.
    StopPolling,
    /// Replace the settings and repeat the last search under them.
    SettingsUpdated(SearchSettings),
    Shutdown,
}

/// A finished search as delivered to the result receiver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub sequence: u64,
    pub request: SearchRequest,
    pub outcome: SearchOutcome,
}

#[derive(Debug)]
enum Message {
    Event(SessionEvent),
    MenuTick(u64),
    DebounceElapsed,
    SearchFinished {
        sequence: u64,
        request: SearchRequest,
        outcome: SearchOutcome,
    },
}

/// Cloneable handle for feeding a running session.
#[derive(Debug, Clone)]
pub struct SessionSender {
    tx: UnboundedSender<Message>,
}

impl SessionSender {
    pub fn send(&self, event: SessionEvent) -> Result<()> {
        self.tx
            .send(Message::Event(event))
            .map_err(|_| SessionError::Closed)
    }

    pub fn input(&self, event: CompositionEvent) -> Result<()> {
        self.send(SessionEvent::Input(event))
    }
}

/// Owns one [`MagicSearch`] and turns its effects into timers and
/// searches.
///
/// Free-text changes are searched once typing has been quiet for
/// `full_text_search.delay_in_ms`; structured changes are searched at once
/// and cancel any pending free-text search. After every successful search
/// the last request is repeated after `polling.interval` seconds while
/// polling is enabled. Only the newest search's result is delivered.
pub struct SearchSession {
    search: MagicSearch,
    executor: Arc<dyn SearchExecutor>,
    settings: SearchSettings,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
    results: UnboundedSender<SearchResult>,
    menu_tick: ScheduledTask,
    debounce: ScheduledTask,
    polling: ScheduledTask,
    in_flight: ScheduledTask,
    last_request: Option<SearchRequest>,
    sequence: u64,
    shutdown: CancellationToken,
}

impl SearchSession {
    pub fn new(
        search: MagicSearch,
        executor: Arc<dyn SearchExecutor>,
        settings: SearchSettings,
    ) -> Result<(Self, UnboundedReceiver<SearchResult>)> {
        settings.validate().map_err(SettingsError::Invalid)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let (results, results_rx) = mpsc::unbounded_channel();
        let session = Self {
            search,
            executor,
            settings,
            tx,
            rx,
            results,
            menu_tick: ScheduledTask::new(),
            debounce: ScheduledTask::new(),
            polling: ScheduledTask::new(),
            in_flight: ScheduledTask::new(),
            last_request: None,
            sequence: 0,
            shutdown: CancellationToken::new(),
        };
        Ok((session, results_rx))
    }

    pub fn sender(&self) -> SessionSender {
        SessionSender {
            tx: self.tx.clone(),
        }
    }

    /// Cancelling this token stops [`SearchSession::run`].
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn search(&self) -> &MagicSearch {
        &self.search
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Runs the initial search, then processes events until shutdown.
    /// Pending timers and searches are cancelled on return.
    pub async fn run(mut self) -> MagicSearch {
        let initial = self.search.search_request();
        self.run_search(initial);

        let shutdown = self.shutdown.clone();
        while let Ok(Some(message)) = self.rx.recv().or_cancel(&shutdown).await {
            if !self.dispatch(message) {
                break;
            }
        }
        tracing::debug!(searches = self.sequence, "search session stopped");
        self.search
    }

    fn dispatch(&mut self, message: Message) -> bool {
        match message {
            Message::Event(SessionEvent::Input(event)) => {
                let transition = self.search.handle(event);
                self.apply(transition);
            }
            Message::Event(SessionEvent::RepeatLastSearch) => self.repeat_last_search(),
            Message::Event(SessionEvent::StopPolling) => self.stop_search_polling(),
            Message::Event(SessionEvent::SettingsUpdated(settings)) => {
                self.update_settings(settings);
            }
            Message::Event(SessionEvent::Shutdown) => return false,
            Message::MenuTick(generation) => {
                let transition = self.search.handle(CompositionEvent::MenuTick(generation));
                self.apply(transition);
            }
            Message::DebounceElapsed => {
                let request = self.search.search_request();
                self.run_search(request);
            }
            Message::SearchFinished {
                sequence,
                request,
                outcome,
            } => self.finish_search(sequence, request, outcome),
        }
        true
    }

    fn apply(&mut self, transition: Transition) {
        for effect in transition.effects {
            match effect {
                Effect::OpenMenu { generation } => {
                    let tx = self.tx.clone();
                    self.menu_tick.schedule(self.settings.menu_tick(), async move {
                        let _ = tx.send(Message::MenuTick(generation));
                    });
                }
                Effect::Search {
                    request,
                    trigger: SearchTrigger::Immediate,
                } => {
                    self.debounce.cancel();
                    self.run_search(request);
                }
                Effect::Search {
                    trigger: SearchTrigger::Debounced,
                    ..
                } => {
                    let tx = self.tx.clone();
                    self.debounce
                        .schedule(self.settings.debounce_delay(), async move {
                            let _ = tx.send(Message::DebounceElapsed);
                        });
                }
            }
        }
    }

    fn run_search(&mut self, request: SearchRequest) {
        // The next poll always counts from the latest search.
        self.stop_search_polling();
        self.sequence += 1;
        let sequence = self.sequence;
        self.last_request = Some(request.clone());
        tracing::debug!(
            sequence,
            query_pattern = %request.query_pattern,
            free_text = ?request.free_text,
            "running search"
        );

        let query = SearchQuery::new(request.clone(), &self.settings);
        let executor = Arc::clone(&self.executor);
        let tx = self.tx.clone();
        self.in_flight.spawn(async move {
            let outcome = SearchOutcome::from(executor.search(query).await);
            let _ = tx.send(Message::SearchFinished {
                sequence,
                request,
                outcome,
            });
        });
    }

    fn finish_search(&mut self, sequence: u64, request: SearchRequest, outcome: SearchOutcome) {
        if sequence != self.sequence {
            tracing::debug!(sequence, latest = self.sequence, "dropping stale search result");
            return;
        }
        if outcome.error {
            tracing::warn!(
                message = ?outcome.message,
                status_code = ?outcome.status_code,
                "search failed"
            );
        } else if let Some(interval) = self.settings.polling_interval() {
            let tx = self.tx.clone();
            self.polling.schedule(interval, async move {
                let _ = tx.send(Message::Event(SessionEvent::RepeatLastSearch));
            });
        }
        let result = SearchResult {
            sequence,
            request,
            outcome,
        };
        if self.results.send(result).is_err() {
            tracing::debug!("search result receiver dropped");
        }
    }

    fn repeat_last_search(&mut self) {
        match self.last_request.clone() {
            Some(request) => self.run_search(request),
            None => tracing::debug!("no search to repeat"),
        }
    }

    fn stop_search_polling(&mut self) {
        self.polling.cancel();
    }

    fn update_settings(&mut self, settings: SearchSettings) {
        if let Err(err) = settings.validate() {
            tracing::warn!(error = %err, "ignoring invalid search settings");
            return;
        }
        self.settings = settings;
        self.repeat_last_search();
    }
}
