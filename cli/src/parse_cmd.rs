use crate::load_catalog;
use anyhow::Result;
use clap::Parser;
use searchlight_magic_search::SearchStrings;
use searchlight_magic_search::UnmatchedTerms;
use searchlight_magic_search::codec;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Query string or URL
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Resolve the terms against this catalog and print the selected facets
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: ParseArgs) -> Result<()> {
    let terms = codec::parse(&args.query);
    let mut stdout = std::io::stdout().lock();
    let Some(path) = args.catalog else {
        for term in terms {
            writeln!(stdout, "{term}")?;
        }
        return Ok(());
    };

    let choices = load_catalog(&path)?;
    let resolved = codec::to_selected_facets(
        &terms,
        &choices,
        None,
        &SearchStrings::default().text,
        UnmatchedTerms::FoldIntoText,
    );
    writeln!(
        stdout,
        "{}",
        serde_json::to_string_pretty(&resolved.facets)?
    )?;
    Ok(())
}
