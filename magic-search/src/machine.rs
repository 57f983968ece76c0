use crate::catalog::FacetCatalog;
use crate::catalog::remove_choice;
use crate::catalog::unused_choices;
use crate::codec;
use crate::codec::SearchTerm;
use crate::codec::UnmatchedTerms;
use crate::input::CompositionEvent;
use crate::matcher::match_facets;
use crate::matcher::match_options;
use crate::request::SearchRequest;
use crate::request::SearchTrigger;
use crate::strings::SearchStrings;
use crate::types::FacetChoice;
use crate::types::FacetDefinition;
use crate::types::FacetOption;
use crate::types::SelectedFacet;

/// Where the composition currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionPhase {
    /// Nothing typed, nothing in progress, menu closed.
    Idle,
    /// Nothing typed, menu showing every unused choice.
    MenuOpen,
    /// A facet was picked and waits for its value.
    SelectingOption,
    /// Typed text narrows the choices or options.
    Filtering,
    /// Typed text matched no facet and is treated as free text.
    TextEntry,
}

/// Side effect requested by a transition. The owner of the machine carries
/// these out; the machine itself never waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the menu on the next tick by delivering
    /// [`CompositionEvent::MenuTick`] with this generation.
    OpenMenu { generation: u64 },
    /// Run a search.
    Search {
        request: SearchRequest,
        trigger: SearchTrigger,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// The search requested by this transition, if any.
    pub fn search(&self) -> Option<(&SearchRequest, SearchTrigger)> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Search { request, trigger } => Some((request, *trigger)),
            Effect::OpenMenu { .. } => None,
        })
    }

    pub fn menu_generation(&self) -> Option<u64> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::OpenMenu { generation } => Some(*generation),
            Effect::Search { .. } => None,
        })
    }
}

/// Facet chosen from the menu that has no value yet.
#[derive(Debug, Clone)]
struct PendingFacet {
    name: String,
    label: String,
    options: Option<Vec<FacetOption>>,
}

impl PendingFacet {
    fn from_choice(choice: &FacetChoice) -> Self {
        let name = SearchTerm::parse(&choice.name).name.to_string();
        Self {
            name,
            label: choice.label.joined(),
            options: choice.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct CompositionState {
    selected_facet: Option<PendingFacet>,
    input: String,
    menu_open: bool,
    filtered_facets: Vec<FacetChoice>,
    filtered_options: Option<Vec<FacetOption>>,
    menu_pending: bool,
}

/// The faceted search bar.
///
/// Owns the current search, the unused choices and the transient
/// composition state. All input arrives through [`MagicSearch::handle`].
#[derive(Debug, Clone)]
pub struct MagicSearch {
    catalog: FacetCatalog,
    unused: Vec<FacetChoice>,
    current_search: Vec<SelectedFacet>,
    composition: CompositionState,
    /// Last committed free text.
    text_search: Option<String>,
    /// Free text currently in effect for searching.
    current_search_text: String,
    query_pattern: String,
    strings: SearchStrings,
    prompt: String,
    menu_generation: u64,
}

impl MagicSearch {
    /// Builds a search bar over `definitions`, seeded from `initial_query`
    /// (a query string or URL) when given.
    pub fn new(
        definitions: Vec<FacetDefinition>,
        initial_query: Option<&str>,
        strings: SearchStrings,
    ) -> Self {
        let prompt = strings.prompt.clone();
        let mut search = Self {
            catalog: FacetCatalog::new(definitions),
            unused: Vec::new(),
            current_search: Vec::new(),
            composition: CompositionState::default(),
            text_search: None,
            current_search_text: String::new(),
            query_pattern: String::new(),
            strings,
            prompt,
            menu_generation: 0,
        };
        search.restore(initial_query.unwrap_or_default());
        search
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    pub fn current_search(&self) -> &[SelectedFacet] {
        &self.current_search
    }

    pub fn unused_choices(&self) -> &[FacetChoice] {
        &self.unused
    }

    /// Choices shown in the menu while no facet is in progress.
    pub fn filtered_facets(&self) -> &[FacetChoice] {
        &self.composition.filtered_facets
    }

    /// Options shown in the menu while an option facet is in progress.
    pub fn filtered_options(&self) -> Option<&[FacetOption]> {
        self.composition.filtered_options.as_deref()
    }

    /// Every option of the in-progress facet.
    pub fn selected_options(&self) -> Option<&[FacetOption]> {
        self.composition
            .selected_facet
            .as_ref()
            .and_then(|facet| facet.options.as_deref())
    }

    /// The in-progress facet in its partial `facet=` form.
    pub fn selected_facet(&self) -> Option<SelectedFacet> {
        self.composition
            .selected_facet
            .as_ref()
            .map(|facet| SelectedFacet::new(&facet.name, "", &facet.label, ""))
    }

    pub fn input(&self) -> &str {
        &self.composition.input
    }

    pub fn is_menu_open(&self) -> bool {
        self.composition.menu_open
    }

    pub fn query_pattern(&self) -> &str {
        &self.query_pattern
    }

    /// Last committed free-text term.
    pub fn free_text(&self) -> Option<&str> {
        self.text_search.as_deref()
    }

    /// Free text currently shown and searched; may be an uncommitted
    /// candidate while the user is typing.
    pub fn current_search_text(&self) -> &str {
        &self.current_search_text
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn strings(&self) -> &SearchStrings {
        &self.strings
    }

    pub fn phase(&self) -> CompositionPhase {
        let state = &self.composition;
        match &state.selected_facet {
            Some(facet) if facet.options.is_some() && !state.input.is_empty() => {
                CompositionPhase::Filtering
            }
            Some(_) => CompositionPhase::SelectingOption,
            None if state.input.is_empty() => {
                if state.menu_open {
                    CompositionPhase::MenuOpen
                } else {
                    CompositionPhase::Idle
                }
            }
            None if state.filtered_facets.is_empty() => CompositionPhase::TextEntry,
            None => CompositionPhase::Filtering,
        }
    }

    pub fn search_request(&self) -> SearchRequest {
        SearchRequest {
            search_facets: self.current_search.clone(),
            query_pattern: self.query_pattern.clone(),
            free_text: Some(self.current_search_text.clone()).filter(|text| !text.is_empty()),
        }
    }

    /// Applies one event and reports the effects the owner must carry out.
    pub fn handle(&mut self, event: CompositionEvent) -> Transition {
        let previous_pattern = self.query_pattern.clone();
        let previous_text = self.current_search_text.clone();
        let mut transition = Transition::default();
        let mut text_committed = false;

        if !matches!(event, CompositionEvent::MenuTick(_)) {
            self.composition.menu_pending = false;
        }

        match event {
            CompositionEvent::Char(ch) => self.on_char(ch, &mut transition),
            CompositionEvent::Backspace => {
                self.composition.input.pop();
                self.on_input_changed(&mut transition);
            }
            CompositionEvent::Tab => self.on_tab(),
            CompositionEvent::Enter => text_committed = self.on_enter(),
            CompositionEvent::Escape => self.on_escape(),
            CompositionEvent::SelectFacet(name) => self.select_facet(&name),
            CompositionEvent::SelectOption(key) => self.select_option(&key),
            CompositionEvent::RemoveFacet(index) => self.remove_facet(index),
            CompositionEvent::Clear => self.clear(),
            CompositionEvent::CatalogChanged(definitions) => self.catalog_changed(definitions),
            CompositionEvent::RestoreQuery(query) => self.restore(&query),
            CompositionEvent::MenuTick(generation) => self.on_menu_tick(generation),
        }

        if self.query_pattern != previous_pattern {
            transition.effects.push(Effect::Search {
                request: self.search_request(),
                trigger: SearchTrigger::Immediate,
            });
        } else if text_committed || self.current_search_text != previous_text {
            transition.effects.push(Effect::Search {
                request: self.search_request(),
                trigger: SearchTrigger::Debounced,
            });
        }
        transition
    }

    fn on_char(&mut self, ch: char, transition: &mut Transition) {
        if ch.is_control() {
            tracing::debug!(?ch, "ignoring control character");
            return;
        }
        if ch == ' ' && self.composition.input.is_empty() {
            // A lone space asks for the menu; it is not typed text.
            self.composition.menu_open = true;
            return;
        }
        self.composition.input.push(ch);
        self.on_input_changed(transition);
    }

    fn on_input_changed(&mut self, transition: &mut Transition) {
        if self.composition.input.is_empty() {
            self.show_all_choices();
        } else {
            let text = self.composition.input.clone();
            self.filter(&text, transition);
        }
    }

    fn show_all_choices(&mut self) {
        self.composition.filtered_facets = self.unused.clone();
        let pending_options = self
            .composition
            .selected_facet
            .as_ref()
            .map(|facet| facet.options.clone());
        match pending_options {
            None => self.current_search_text.clear(),
            Some(None) => self.reset_state(),
            Some(options) => self.composition.filtered_options = options,
        }
    }

    fn filter(&mut self, text: &str, transition: &mut Transition) {
        let matched = match &self.composition.selected_facet {
            None => {
                let matches = match_facets(&self.unused, text);
                let matched = !matches.is_empty();
                self.composition.filtered_facets = matches;
                if !matched {
                    tracing::debug!(text, "no facet matches; treating input as free text");
                    self.current_search_text = text.to_string();
                    self.composition.menu_open = false;
                }
                matched
            }
            // A free-text facet is collecting its value.
            Some(PendingFacet { options: None, .. }) => return,
            Some(PendingFacet {
                options: Some(options),
                ..
            }) => {
                let matches = match_options(options, text);
                let matched = !matches.is_empty();
                self.composition.filtered_options = Some(matches);
                matched
            }
        };
        if matched {
            self.schedule_menu_open(transition);
        }
    }

    fn schedule_menu_open(&mut self, transition: &mut Transition) {
        self.menu_generation += 1;
        self.composition.menu_pending = true;
        transition.effects.push(Effect::OpenMenu {
            generation: self.menu_generation,
        });
    }

    fn on_menu_tick(&mut self, generation: u64) {
        if self.composition.menu_pending && generation == self.menu_generation {
            self.composition.menu_open = true;
            self.composition.menu_pending = false;
        } else {
            tracing::trace!(generation, "stale menu tick");
        }
    }

    fn on_tab(&mut self) {
        if self.composition.selected_facet.is_none() {
            let [only] = self.composition.filtered_facets.as_slice() else {
                return;
            };
            let name = only.name.clone();
            self.select_facet(&name);
        } else {
            let Some([only]) = self.composition.filtered_options.as_deref() else {
                return;
            };
            let key = only.key.clone();
            self.select_option(&key);
        }
    }

    /// Returns whether free text was committed.
    fn on_enter(&mut self) -> bool {
        let committed = match self.composition.selected_facet.take() {
            Some(facet) if facet.options.is_none() => {
                if self.composition.input.is_empty() {
                    tracing::debug!(facet = %facet.name, "free-text facet needs a value");
                    self.composition.selected_facet = Some(facet);
                    return false;
                }
                let value = std::mem::take(&mut self.composition.input);
                self.current_search
                    .push(SelectedFacet::new(&facet.name, &value, &facet.label, &value));
                self.reset_state();
                self.update_current_search_facets(None);
                self.composition.menu_open = false;
                false
            }
            pending => {
                let text = std::mem::take(&mut self.composition.input);
                if pending.is_some() {
                    self.reset_state();
                }
                self.commit_text(text)
            }
        };
        self.composition.filtered_facets = self.unused.clone();
        self.refresh_prompt();
        committed
    }

    fn commit_text(&mut self, text: String) -> bool {
        self.current_search.retain(|facet| !facet.is_text());
        self.composition.menu_open = false;
        if text.is_empty() {
            self.text_search = None;
            self.current_search_text.clear();
            return false;
        }
        self.current_search
            .push(SelectedFacet::text(&text, &self.strings.text));
        self.current_search_text = text.clone();
        self.text_search = Some(text);
        true
    }

    fn on_escape(&mut self) {
        self.composition.menu_open = false;
        self.reset_state();
        self.current_search_text = self.text_search.clone().unwrap_or_default();
    }

    fn select_facet(&mut self, name: &str) {
        let Some(choice) = self.unused.iter().find(|choice| choice.name == name) else {
            tracing::warn!(facet = name, "selected facet is not an unused choice");
            return;
        };
        let pending = PendingFacet::from_choice(choice);
        self.composition.menu_open = false;
        if let Some(options) = &pending.options {
            self.composition.filtered_options = Some(options.clone());
            self.composition.menu_open = true;
        }
        tracing::debug!(facet = %pending.name, "facet selected");
        self.composition.selected_facet = Some(pending);
        self.composition.input.clear();
        self.prompt.clear();
    }

    fn select_option(&mut self, key: &str) {
        let Some(facet) = &self.composition.selected_facet else {
            tracing::warn!(option = key, "option selected with no facet in progress");
            return;
        };
        let Some(option) = facet
            .options
            .as_ref()
            .and_then(|options| options.iter().find(|option| option.key == key))
        else {
            tracing::warn!(facet = %facet.name, option = key, "unknown option for facet");
            return;
        };
        let selected = SelectedFacet::new(
            &facet.name,
            &option.key,
            &facet.label,
            &option.label.joined(),
        );
        tracing::debug!(facet = %selected.name, "facet completed");
        self.composition.menu_open = false;
        self.current_search.push(selected);
        self.reset_state();
        self.update_current_search_facets(None);
    }

    fn remove_facet(&mut self, index: usize) {
        if index >= self.current_search.len() {
            tracing::warn!(
                index,
                len = self.current_search.len(),
                "facet index out of range"
            );
            return;
        }
        let removed = self.current_search.remove(index);
        if self.composition.selected_facet.is_some() {
            self.reset_state();
        }
        self.update_current_search_facets(Some(&removed));
        let names = self.current_search_names();
        self.init_facets(&names, UnmatchedTerms::Drop);
        self.refresh_prompt();
    }

    fn clear(&mut self) {
        self.current_search.clear();
        self.text_search = None;
        self.current_search_text.clear();
        self.unused = self.catalog.choices();
        self.composition.menu_open = false;
        self.reset_state();
        self.update_current_search_facets(None);
    }

    fn catalog_changed(&mut self, definitions: Vec<FacetDefinition>) {
        self.catalog = FacetCatalog::new(definitions);
        let names = self.current_search_names();
        self.init_facets(&names, UnmatchedTerms::Drop);
        self.update_current_search_facets(None);

        let Some(pending) = self.composition.selected_facet.take() else {
            return;
        };
        let refreshed = self
            .unused
            .iter()
            .find(|choice| choice.name == pending.name)
            .map(PendingFacet::from_choice);
        match refreshed {
            Some(refreshed) => {
                self.composition.filtered_options = refreshed.options.clone();
                self.composition.selected_facet = Some(refreshed);
                if !self.composition.input.is_empty() {
                    let text = self.composition.input.clone();
                    let mut ignored = Transition::default();
                    self.filter(&text, &mut ignored);
                    self.composition.menu_pending = false;
                }
            }
            None => {
                tracing::debug!(facet = %pending.name, "in-progress facet left the catalog");
                self.composition.menu_open = false;
                self.reset_state();
            }
        }
    }

    fn restore(&mut self, query: &str) {
        self.text_search = None;
        self.composition = CompositionState::default();
        let terms = codec::parse(query);
        self.init_facets(&terms, UnmatchedTerms::FoldIntoText);
        self.current_search_text = self.text_search.clone().unwrap_or_default();
        self.reset_state();
        self.update_current_search_facets(None);
        self.refresh_prompt();
    }

    /// Re-derives the current search and the unused choices from `terms`.
    fn init_facets<S: AsRef<str>>(&mut self, terms: &[S], unmatched: UnmatchedTerms) {
        let choices = self.catalog.choices();
        let resolved = codec::to_selected_facets(
            terms,
            &choices,
            self.text_search.as_deref(),
            &self.strings.text,
            unmatched,
        );
        self.current_search = resolved.facets;
        self.text_search = resolved.free_text;
        self.unused = unused_choices(&choices, self.current_search_names());
        self.composition.filtered_facets = self.unused.clone();
    }

    fn update_current_search_facets(&mut self, removed: Option<&SelectedFacet>) {
        if removed.is_some_and(SelectedFacet::is_text) {
            self.current_search_text.clear();
            self.text_search = None;
            return;
        }
        self.query_pattern = codec::serialize(&self.current_search);
        if let Some(last) = self.current_search.last() {
            remove_choice(&SearchTerm::parse(&last.name), &mut self.unused);
        }
    }

    fn reset_state(&mut self) {
        self.composition.input.clear();
        self.composition.filtered_facets = self.unused.clone();
        self.composition.selected_facet = None;
        self.composition.filtered_options = None;
        self.refresh_prompt();
    }

    fn refresh_prompt(&mut self) {
        if self.current_search.is_empty() && self.composition.selected_facet.is_none() {
            self.prompt = self.strings.prompt.clone();
        } else {
            self.prompt.clear();
        }
    }

    fn current_search_names(&self) -> Vec<String> {
        self.current_search
            .iter()
            .map(|facet| facet.name.clone())
            .collect()
    }
}
