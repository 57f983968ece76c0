//! Events consumed by [`MagicSearch`](crate::MagicSearch).

use crate::types::FacetDefinition;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionEvent {
    /// A printable character typed into the search box.
    Char(char),
    Backspace,
    Tab,
    Enter,
    Escape,

    /// The user picked a facet from the menu, by facet name.
    SelectFacet(String),

    /// The user picked an option of the in-progress facet, by option key.
    SelectOption(String),

    /// Remove the facet at this index of the current search.
    RemoveFacet(usize),

    /// Drop every facet and the free text.
    Clear,

    /// The set of available facets changed.
    CatalogChanged(Vec<FacetDefinition>),

    /// Replace the search with the terms of a query string or URL.
    RestoreQuery(String),

    /// A deferred menu-open scheduled by an earlier transition came due.
    MenuTick(u64),
}

/// Maps a terminal key event onto a composition event.
///
/// Releases and chords with Super/Meta are ignored, as are keys the search
/// box has no use for.
pub fn event_for_key(key: &KeyEvent) -> Option<CompositionEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::SUPER | KeyModifiers::META)
    {
        return None;
    }
    match key.code {
        KeyCode::Tab => Some(CompositionEvent::Tab),
        KeyCode::Esc => Some(CompositionEvent::Escape),
        KeyCode::Enter => Some(CompositionEvent::Enter),
        KeyCode::Backspace => Some(CompositionEvent::Backspace),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(CompositionEvent::Char(ch))
        }
        _ => None,
    }
}
