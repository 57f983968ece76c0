use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use searchlight_cli::parse_cmd::ParseArgs;
use searchlight_cli::replay_cmd::ReplayArgs;
use searchlight_cli::settings_cmd::SettingsArgs;
use tracing_subscriber::EnvFilter;

/// Faceted search bar tooling.
#[derive(Debug, Parser)]
#[command(name = "searchlight", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a key script against a catalog and print the search request
    Replay(ReplayArgs),

    /// Split a query string or URL into terms
    Parse(ParseArgs),

    /// Validate and print search settings
    Settings(SettingsArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => searchlight_cli::replay_cmd::run(args),
        Command::Parse(args) => searchlight_cli::parse_cmd::run(args),
        Command::Settings(args) => searchlight_cli::settings_cmd::run(args),
    }
}
