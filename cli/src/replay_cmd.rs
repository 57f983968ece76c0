use crate::load_catalog;
use crate::script::parse_script;
use anyhow::Result;
use clap::Parser;
use searchlight_magic_search::CompositionEvent;
use searchlight_magic_search::Effect;
use searchlight_magic_search::MagicSearch;
use searchlight_magic_search::SearchRequest;
use searchlight_magic_search::SearchStrings;
use searchlight_magic_search::SearchTrigger;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct ReplayArgs {
    /// JSON file holding the facet catalog
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Query string or URL to restore before replaying
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Label free text as a server-side full text search
    #[arg(long)]
    pub server_search: bool,

    /// Print every search the script triggers, one JSON object per line
    #[arg(long)]
    pub searches: bool,

    /// Key script, e.g. `si<Tab><Tab>`
    #[arg(value_name = "SCRIPT")]
    pub script: String,
}

#[derive(Debug, Serialize)]
struct TriggeredSearch {
    step: usize,
    trigger: SearchTrigger,
    request: SearchRequest,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let events = parse_script(&args.script)?;
    let strings = SearchStrings::for_full_text_search(!args.server_search);
    let mut search = MagicSearch::new(catalog, args.query.as_deref(), strings);

    let mut stdout = std::io::stdout().lock();
    for (step, event) in events.into_iter().enumerate() {
        tracing::debug!(step, ?event, "replaying");
        for (request, trigger) in replay_step(&mut search, event) {
            if args.searches {
                let line = serde_json::to_string(&TriggeredSearch {
                    step,
                    trigger,
                    request,
                })?;
                writeln!(stdout, "{line}")?;
            }
        }
    }
    writeln!(
        stdout,
        "{}",
        serde_json::to_string(&search.search_request())?
    )?;
    Ok(())
}

/// Applies one event and, when it asks for one, the menu tick that follows.
/// Returns the searches both requested.
pub fn replay_step(
    search: &mut MagicSearch,
    event: CompositionEvent,
) -> Vec<(SearchRequest, SearchTrigger)> {
    let mut effects = search.handle(event).effects;
    let tick = effects.iter().find_map(|effect| match effect {
        Effect::OpenMenu { generation } => Some(*generation),
        Effect::Search { .. } => None,
    });
    if let Some(generation) = tick {
        effects.extend(search.handle(CompositionEvent::MenuTick(generation)).effects);
    }
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Search { request, trigger } => Some((request, trigger)),
            Effect::OpenMenu { .. } => None,
        })
        .collect()
}
