//! Drives one search bar: delivers deferred menu ticks, debounces free-text
//! searches, runs structured searches immediately and repeats the last
//! search on a polling interval. [`SavedSearch`] keeps a stored query
//! fresh on its own timer.

mod error;
mod executor;
mod saved;
mod session;
mod settings;

pub use error::ExecutorError;
pub use error::Result;
pub use error::SessionError;
pub use error::SettingsError;
pub use executor::SearchExecutor;
pub use executor::SearchHit;
pub use executor::SearchOutcome;
pub use executor::SearchQuery;
pub use executor::SearchResponse;
pub use executor::normalize_hit;
pub use saved::SavedSearch;
pub use session::SearchResult;
pub use session::SearchSession;
pub use session::SessionEvent;
pub use session::SessionSender;
pub use settings::FullTextSearchSettings;
pub use settings::GeneralSettings;
pub use settings::PollingSettings;
pub use settings::SearchSettings;
