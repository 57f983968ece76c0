use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use searchlight_session::SearchSettings;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct SettingsArgs {
    /// TOML settings file; defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Prints the effective settings after validation.
pub fn run(args: SettingsArgs) -> Result<()> {
    let settings = match &args.file {
        Some(path) => SearchSettings::load(path)
            .with_context(|| format!("invalid settings in {}", path.display()))?,
        None => SearchSettings::default(),
    };
    print!("{}", settings.to_toml_string()?);
    Ok(())
}
