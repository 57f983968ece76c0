use pretty_assertions::assert_eq;
use searchlight_magic_search::CompositionEvent;
use searchlight_magic_search::FacetDefinition;
use searchlight_magic_search::FacetOption;
use searchlight_magic_search::MagicSearch;
use searchlight_magic_search::SearchStrings;

fn catalog() -> Vec<FacetDefinition> {
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
        FacetDefinition::free_text("ip", "IP Address"),
    ]
}

#[test]
fn unchanged_catalog_reproduces_current_search() {
    let mut search = MagicSearch::new(
        catalog(),
        Some("ip=10.0.0.1&status=error&name=web"),
        SearchStrings::default(),
    );
    let before = search.current_search().to_vec();
    let pattern = search.query_pattern().to_string();

    let transition = search.handle(CompositionEvent::CatalogChanged(catalog()));

    assert_eq!(search.current_search(), before.as_slice());
    assert_eq!(search.query_pattern(), pattern);
    assert!(transition.search().is_none());
}

#[test]
fn reordered_catalog_keeps_selection_order() {
    let mut search = MagicSearch::new(catalog(), Some("ip=10.0.0.1&name=web"), SearchStrings::default());
    let mut reordered = catalog();
    reordered.reverse();

    search.handle(CompositionEvent::CatalogChanged(reordered));

    assert_eq!(search.query_pattern(), "ip=10.0.0.1&name=web");
    let unused: Vec<&str> = search
        .unused_choices()
        .iter()
        .map(|choice| choice.name.as_str())
        .collect();
    assert_eq!(unused, vec!["status"]);
}

#[test]
fn dropped_option_key_removes_facet() {
    let mut search = MagicSearch::new(catalog(), Some("status=error&name=web"), SearchStrings::default());
    let narrowed = vec![
        FacetDefinition::free_text("name", "Name"),
        FacetDefinition::with_options(
            "status",
            "Status",
            vec![FacetOption::new("active", "Active")],
        ),
    ];

    search.handle(CompositionEvent::CatalogChanged(narrowed));

    assert_eq!(search.query_pattern(), "name=web");
    assert_eq!(search.unused_choices().len(), 1);
    assert_eq!(search.unused_choices()[0].name, "status");
}

#[test]
fn free_text_survives_catalog_change() {
    let mut search = MagicSearch::new(catalog(), Some("name=web&needle"), SearchStrings::default());

    search.handle(CompositionEvent::CatalogChanged(Vec::new()));

    assert_eq!(search.free_text(), Some("needle"));
    assert_eq!(search.current_search_text(), "needle");
    assert_eq!(search.query_pattern(), "");
    assert_eq!(search.current_search().len(), 1);
    assert!(search.current_search()[0].is_text());
}

#[test]
fn in_progress_facet_picks_up_new_options() {
    let mut search = MagicSearch::new(catalog(), None, SearchStrings::default());
    search.handle(CompositionEvent::SelectFacet("status".to_string()));

    let mut updated = catalog();
    updated[1] = FacetDefinition::with_options(
        "status",
        "State",
        vec![FacetOption::new("paused", "Paused")],
    );
    search.handle(CompositionEvent::CatalogChanged(updated));

    assert_eq!(
        search.selected_facet().map(|facet| facet.label.0),
        Some("State".to_string())
    );
    search.handle(CompositionEvent::Tab);
    assert_eq!(search.query_pattern(), "status=paused");
}
