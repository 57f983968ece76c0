//! # Searchlight Magic Search
//!
//! Faceted-search input engine. Key events go in, a structured list of
//! selected facets and a `&`-joined query pattern come out. The reverse
//! direction (query string back into facets) is used to restore a search
//! from a URL.
//!
//! ## Architecture
//!
//! ```text
//! key events ──> MagicSearch (machine) ──> CurrentSearch ──> codec::serialize ──> query pattern
//!                    │        │
//!                    │        └─> matcher (prefix filter of choices / options)
//!                    └─> catalog (all choices, unused choices)
//!
//! query string ──> codec::parse ──> codec::to_selected_facets ──> MagicSearch
//! ```
//!
//! ## Example
//!
//! ```
//! use searchlight_magic_search::CompositionEvent;
//! use searchlight_magic_search::FacetDefinition;
//! use searchlight_magic_search::FacetOption;
//! use searchlight_magic_search::MagicSearch;
//! use searchlight_magic_search::SearchStrings;
//!
//! let catalog = vec![
//!     FacetDefinition::free_text("status", "Status"),
//!     FacetDefinition::with_options("size", "Size", vec![FacetOption::new("s", "Small")]),
//! ];
//! let mut search = MagicSearch::new(catalog, None, SearchStrings::default());
//! for ch in "si".chars() {
//!     search.handle(CompositionEvent::Char(ch));
//! }
//! search.handle(CompositionEvent::Tab);
//! search.handle(CompositionEvent::Tab);
//! assert_eq!(search.query_pattern(), "size=s");
//! ```

pub mod catalog;
pub mod codec;
pub mod input;
mod machine;
pub mod matcher;
mod request;
mod strings;
mod types;

pub use catalog::FacetCatalog;
pub use codec::ResolvedSearch;
pub use codec::SearchTerm;
pub use codec::UnmatchedTerms;
pub use input::CompositionEvent;
pub use machine::CompositionPhase;
pub use machine::Effect;
pub use machine::MagicSearch;
pub use machine::Transition;
pub use request::SearchRequest;
pub use request::SearchTrigger;
pub use strings::SearchStrings;
pub use types::FacetChoice;
pub use types::FacetDefinition;
pub use types::FacetOption;
pub use types::Label;
pub use types::SelectedFacet;
pub use types::TEXT_FACET_NAME;
