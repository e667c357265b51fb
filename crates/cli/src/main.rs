mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "vkp", version, about = "Folder index notes, kept in sync")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// Regenerate every index document from scratch
    Sync,

    /// Watch the vault and keep index documents in sync
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Quiet period before a burst of events becomes one sync pass
    #[arg(long, default_value_t = 3000)]
    pub debounce_ms: u64,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref());
        }
        Commands::Sync => {
            cmd::sync::run(cli.config.as_deref(), cli.profile.as_deref());
        }
        Commands::Watch(args) => {
            cmd::watch::run(cli.config.as_deref(), cli.profile.as_deref(), &args);
        }
    }
}
