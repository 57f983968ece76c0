//! Key scripts: a compact text form of what a user typed into the bar.
//!
//! Plain characters are typed as-is. Angle-bracket tokens stand for keys or
//! menu actions:
//!
//! | token          | meaning                                 |
//! |----------------|-----------------------------------------|
//! | `<Tab>`        | Tab                                     |
//! | `<Enter>`      | Enter                                   |
//! | `<Esc>`        | Escape                                  |
//! | `<BS>`         | Backspace                               |
//! | `<Space>`      | a space                                 |
//! | `<Lt>`         | a literal `<`                           |
//! | `<Clear>`      | clear the search                        |
//! | `<Remove:N>`   | remove the facet at index `N`           |
//! | `<Facet:name>` | pick a facet from the menu              |
//! | `<Option:key>` | pick an option of the facet in progress |

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use searchlight_magic_search::CompositionEvent;
use searchlight_magic_search::input::event_for_key;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unterminated key token starting at offset {offset}")]
    Unterminated { offset: usize },

    #[error("unknown key token <{token}>")]
    UnknownToken { token: String },

    #[error("invalid facet index in <{token}>")]
    InvalidIndex { token: String },
}

/// Parses a key script into composition events.
pub fn parse_script(script: &str) -> Result<Vec<CompositionEvent>, ScriptError> {
    let mut events = Vec::new();
    let mut rest = script;
    let mut offset = 0;
    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            let Some(end) = rest.find('>') else {
                return Err(ScriptError::Unterminated { offset });
            };
            let token = &rest[1..end];
            events.extend(parse_token(token)?);
            offset += end + 1;
            rest = &rest[end + 1..];
        } else {
            events.extend(key(KeyCode::Char(ch)));
            offset += ch.len_utf8();
            rest = &rest[ch.len_utf8()..];
        }
    }
    Ok(events)
}

fn parse_token(token: &str) -> Result<Option<CompositionEvent>, ScriptError> {
    if let Some((name, argument)) = token.split_once(':') {
        return match name {
            "Remove" => argument
                .parse()
                .map(|index| Some(CompositionEvent::RemoveFacet(index)))
                .map_err(|_| ScriptError::InvalidIndex {
                    token: token.to_string(),
                }),
            "Facet" => Ok(Some(CompositionEvent::SelectFacet(argument.to_string()))),
            "Option" => Ok(Some(CompositionEvent::SelectOption(argument.to_string()))),
            _ => Err(ScriptError::UnknownToken {
                token: token.to_string(),
            }),
        };
    }
    let event = match token {
        "Tab" => key(KeyCode::Tab),
        "Enter" => key(KeyCode::Enter),
        "Esc" => key(KeyCode::Esc),
        "BS" => key(KeyCode::Backspace),
        "Space" => key(KeyCode::Char(' ')),
        "Lt" => key(KeyCode::Char('<')),
        "Clear" => Some(CompositionEvent::Clear),
        _ => {
            return Err(ScriptError::UnknownToken {
                token: token.to_string(),
            });
        }
    };
    Ok(event)
}

fn key(code: KeyCode) -> Option<CompositionEvent> {
    event_for_key(&KeyEvent::new(code, KeyModifiers::NONE))
}
