mod commands;
mod project;

#[cfg(feature = "watch")]
mod dev;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use routegen::CONFIG_FILE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "routegen")]
#[command(version, about = "Generate typed route helpers from a file-based routing tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    paths: PathArgs,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Locations shared by every command; flags override the config file
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Directory to scan for routes
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Directory to write generated files to
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan routes and write the generated files once (default)
    Generate,

    /// Create the config file and hand-owned helpers, then generate
    Init,

    /// Regenerate whenever the route tree changes
    Watch,
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Execute command
    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            let config = commands::resolve_config(&cli.paths);
            commands::generate::execute(&config)?;
        }
        Commands::Init => {
            commands::init::execute(&cli.paths)?;
        }
        Commands::Watch => {
            let config = commands::resolve_config(&cli.paths);
            commands::watch::execute(config)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
