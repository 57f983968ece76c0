use pretty_assertions::assert_eq;
use searchlight_magic_search::CompositionEvent;
use searchlight_magic_search::CompositionPhase;
use searchlight_magic_search::FacetDefinition;
use searchlight_magic_search::FacetOption;
use searchlight_magic_search::Label;
use searchlight_magic_search::MagicSearch;
use searchlight_magic_search::SearchStrings;
use searchlight_magic_search::SearchTrigger;
use searchlight_magic_search::SelectedFacet;

fn status_and_size() -> Vec<FacetDefinition> {
    vec![
        FacetDefinition::free_text("status", "Status"),
        FacetDefinition::with_options("size", "Size", vec![FacetOption::new("s", "Small")]),
    ]
}

fn server_catalog() -> Vec<FacetDefinition> {
    vec![
        FacetDefinition::free_text("name", "Name"),
        FacetDefinition::with_options(
            "status",
            "Status",
            vec![
                FacetOption::new("active", "Active"),
                FacetOption::new("error", "Error"),
            ],
        ),
        FacetDefinition::with_options("flavor", "Flavor", vec![FacetOption::new("m1", "m1.tiny")]),
    ]
}

fn type_text(search: &mut MagicSearch, text: &str) {
    for ch in text.chars() {
        search.handle(CompositionEvent::Char(ch));
    }
}

fn unused_names(search: &MagicSearch) -> Vec<String> {
    search
        .unused_choices()
        .iter()
        .map(|choice| choice.name.clone())
        .collect()
}

#[test]
fn typing_si_then_tab_twice_selects_small_size() {
    let mut search = MagicSearch::new(status_and_size(), None, SearchStrings::default());

    type_text(&mut search, "si");
    let filtered: Vec<&str> = search
        .filtered_facets()
        .iter()
        .map(|choice| choice.name.as_str())
        .collect();
    assert_eq!(filtered, vec!["size"]);
    assert_eq!(
        search.filtered_facets()[0].label,
        Label::Split("Si".to_string(), "ze".to_string())
    );

    search.handle(CompositionEvent::Tab);
    assert_eq!(
        search.selected_facet().map(|facet| facet.name),
        Some("size=".to_string())
    );
    assert_eq!(
        search.filtered_options(),
        Some([FacetOption::new("s", "Small")].as_slice())
    );

    let transition = search.handle(CompositionEvent::Tab);
    assert_eq!(
        search.current_search(),
        [SelectedFacet::new("size", "s", "Size", "Small")].as_slice()
    );
    assert_eq!(search.query_pattern(), "size=s");

    let (request, trigger) = transition.search().expect("completing a facet searches");
    assert_eq!(trigger, SearchTrigger::Immediate);
    assert_eq!(request.query_pattern, "size=s");
    assert_eq!(request.free_text, None);
}

#[test]
fn tab_completion_matches_explicit_selection() {
    let mut by_tab = MagicSearch::new(server_catalog(), None, SearchStrings::default());
    type_text(&mut by_tab, "fl");
    by_tab.handle(CompositionEvent::Tab);
    by_tab.handle(CompositionEvent::Tab);

    let mut by_click = MagicSearch::new(server_catalog(), None, SearchStrings::default());
    by_click.handle(CompositionEvent::SelectFacet("flavor".to_string()));
    by_click.handle(CompositionEvent::SelectOption("m1".to_string()));

    assert_eq!(by_tab.current_search(), by_click.current_search());
    assert_eq!(by_tab.query_pattern(), "flavor=m1");
    assert_eq!(unused_names(&by_tab), unused_names(&by_click));
}

#[test]
fn free_text_entry_is_replaced_not_duplicated() {
    let mut search = MagicSearch::new(Vec::new(), None, SearchStrings::default());

    type_text(&mut search, "hello");
    assert_eq!(search.phase(), CompositionPhase::TextEntry);
    search.handle(CompositionEvent::Enter);
    assert_eq!(search.free_text(), Some("hello"));

    type_text(&mut search, "world");
    let transition = search.handle(CompositionEvent::Enter);
    assert_eq!(
        search.current_search(),
        [SelectedFacet::text("world", "Search in current results")].as_slice()
    );
    assert_eq!(search.free_text(), Some("world"));
    assert_eq!(
        transition.search().map(|(request, trigger)| (request.free_text.clone(), trigger)),
        Some((Some("world".to_string()), SearchTrigger::Debounced))
    );
}

#[test]
fn clear_twice_restores_full_catalog_both_times() {
    let mut search = MagicSearch::new(
        server_catalog(),
        Some("status=active&name=web&hello"),
        SearchStrings::default(),
    );
    assert_eq!(search.current_search().len(), 3);

    for _ in 0..2 {
        search.handle(CompositionEvent::Clear);
        assert!(search.current_search().is_empty());
        assert_eq!(unused_names(&search), vec!["name", "status", "flavor"]);
        assert_eq!(search.free_text(), None);
        assert_eq!(search.phase(), CompositionPhase::Idle);
    }
}

#[test]
fn removing_any_entry_returns_its_facet() {
    let query = "status=error&name=db&flavor=m1&needle";
    let initial = MagicSearch::new(server_catalog(), Some(query), SearchStrings::default());
    let len = initial.current_search().len();
    assert_eq!(len, 4);

    for index in 0..len {
        let mut search = initial.clone();
        let removed = search.current_search()[index].clone();
        search.handle(CompositionEvent::RemoveFacet(index));

        assert_eq!(search.current_search().len(), len - 1);
        assert!(!search.current_search().contains(&removed));
        let unused = unused_names(&search);
        if removed.is_text() {
            assert_eq!(search.free_text(), None);
            assert!(unused.is_empty());
        } else {
            assert_eq!(unused, vec![removed.facet_name().to_string()]);
        }
    }
}

#[test]
fn escape_abandons_in_progress_facet() {
    let mut search = MagicSearch::new(server_catalog(), None, SearchStrings::default());
    search.handle(CompositionEvent::SelectFacet("status".to_string()));
    type_text(&mut search, "er");
    assert_eq!(search.phase(), CompositionPhase::Filtering);

    let transition = search.handle(CompositionEvent::Escape);
    assert!(transition.is_empty());
    assert_eq!(search.phase(), CompositionPhase::Idle);
    assert!(search.selected_facet().is_none());
    assert_eq!(search.unused_choices().len(), 3);
}

#[test]
fn prompt_is_shown_only_for_an_empty_search() {
    let strings = SearchStrings {
        prompt: "Filter servers".to_string(),
        ..SearchStrings::default()
    };
    let mut search = MagicSearch::new(server_catalog(), None, strings);
    assert_eq!(search.prompt(), "Filter servers");

    search.handle(CompositionEvent::SelectFacet("name".to_string()));
    assert_eq!(search.prompt(), "");
    type_text(&mut search, "web");
    search.handle(CompositionEvent::Enter);
    assert_eq!(search.prompt(), "");

    search.handle(CompositionEvent::RemoveFacet(0));
    assert_eq!(search.prompt(), "Filter servers");
}

#[test]
fn enter_during_option_facet_commits_typed_text() {
    let mut search = MagicSearch::new(server_catalog(), Some("hello"), SearchStrings::default());
    assert_eq!(search.free_text(), Some("hello"));

    search.handle(CompositionEvent::SelectFacet("status".to_string()));
    type_text(&mut search, "xyz");
    assert_eq!(search.filtered_options().map(<[FacetOption]>::len), Some(0));

    let transition = search.handle(CompositionEvent::Enter);
    assert_eq!(
        search.current_search(),
        [SelectedFacet::text("xyz", "Search in current results")].as_slice()
    );
    assert_eq!(search.free_text(), Some("xyz"));
    assert!(search.selected_facet().is_none());
    assert_eq!(search.phase(), CompositionPhase::Idle);
    assert_eq!(unused_names(&search), vec!["name", "status", "flavor"]);
    assert_eq!(
        transition.search().map(|(request, trigger)| (request.free_text.clone(), trigger)),
        Some((Some("xyz".to_string()), SearchTrigger::Debounced))
    );
}
