use pretty_assertions::assert_eq;
use searchlight_magic_search::CompositionEvent;
use searchlight_magic_search::FacetDefinition;
use searchlight_magic_search::FacetOption;
use searchlight_magic_search::MagicSearch;
use searchlight_magic_search::SearchStrings;
use searchlight_magic_search::SearchTrigger;
use searchlight_magic_search::SelectedFacet;
use searchlight_magic_search::codec;

fn catalog() -> Vec<FacetDefinition> {
    vec![
        FacetDefinition::free_text("name", "Name"),
        FacetDefinition::with_options(
            "size",
            "Size",
            vec![FacetOption::new("s", "Small"), FacetOption::new("l", "Large")],
        ),
        FacetDefinition::with_options(
            "zone",
            "Zone",
            vec![FacetOption::new("a", "Zone A"), FacetOption::new("b", "Zone B")],
        ),
    ]
}

#[test]
fn option_backed_search_round_trips_through_query_pattern() {
    let mut search = MagicSearch::new(catalog(), None, SearchStrings::default());
    search.handle(CompositionEvent::SelectFacet("zone".to_string()));
    search.handle(CompositionEvent::SelectOption("b".to_string()));
    search.handle(CompositionEvent::SelectFacet("size".to_string()));
    search.handle(CompositionEvent::SelectOption("l".to_string()));

    let names: Vec<String> = search
        .current_search()
        .iter()
        .map(|facet| facet.name.clone())
        .collect();
    assert_eq!(codec::parse(search.query_pattern()), names);

    let restored = MagicSearch::new(catalog(), Some(search.query_pattern()), SearchStrings::default());
    assert_eq!(restored.current_search(), search.current_search());
}

#[test]
fn restores_from_url_and_folds_unknown_terms() {
    let search = MagicSearch::new(
        catalog(),
        Some("https://dash.example/project/instances/?size=s&color=red&name=db-1#top"),
        SearchStrings::for_full_text_search(false),
    );
    assert_eq!(
        search.current_search(),
        [
            SelectedFacet::new("size", "s", "Size", "Small"),
            SelectedFacet::text("color=red", "Full Text Search"),
            SelectedFacet::new("name", "db-1", "Name", "db-1"),
        ]
        .as_slice()
    );
    assert_eq!(search.query_pattern(), "size=s&name=db-1");
    assert_eq!(search.current_search_text(), "color=red");
    assert_eq!(search.search_request().free_text.as_deref(), Some("color=red"));
}

#[test]
fn restore_event_replaces_search_and_triggers_immediately() {
    let mut search = MagicSearch::new(catalog(), Some("size=s"), SearchStrings::default());
    search.handle(CompositionEvent::SelectFacet("name".to_string()));

    let transition = search.handle(CompositionEvent::RestoreQuery("?zone=a".to_string()));

    assert!(search.selected_facet().is_none());
    assert_eq!(search.query_pattern(), "zone=a");
    assert_eq!(
        transition.search().map(|(_, trigger)| trigger),
        Some(SearchTrigger::Immediate)
    );
    let unused: Vec<&str> = search
        .unused_choices()
        .iter()
        .map(|choice| choice.name.as_str())
        .collect();
    assert_eq!(unused, vec!["name", "size"]);
}

#[test]
fn values_may_contain_the_separator() {
    let search = MagicSearch::new(catalog(), Some("name=a=b"), SearchStrings::default());
    assert_eq!(search.current_search()[0].label.1, "a=b");
    assert_eq!(search.query_pattern(), "name=a=b");
}

#[test]
fn restored_pattern_keeps_question_marks_in_values() {
    let mut search = MagicSearch::new(catalog(), None, SearchStrings::default());
    search.handle(CompositionEvent::SelectFacet("name".to_string()));
    for ch in "what?x#1".chars() {
        search.handle(CompositionEvent::Char(ch));
    }
    search.handle(CompositionEvent::Enter);
    assert_eq!(search.query_pattern(), "name=what?x#1");

    let restored = MagicSearch::new(catalog(), Some(search.query_pattern()), SearchStrings::default());
    assert_eq!(
        restored.current_search(),
        [SelectedFacet::new("name", "what?x#1", "Name", "what?x#1")].as_slice()
    );
    assert_eq!(restored.free_text(), None);
}
