//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod search;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Bridge between a map search widget and Amazon Location place indexes
#[derive(Parser)]
#[command(name = "geocoder-bridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Forward geocode free text
    Geocode(search::SearchArgs),

    /// Autosuggest candidates for partial text
    Suggest(search::SearchArgs),

    /// Resolve a suggestion's place id
    Place(search::SearchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show configuration and server status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Geocode(args) => search::run(search::Operation::Geocode, args).await,
        Commands::Suggest(args) => search::run(search::Operation::Suggest, args).await,
        Commands::Place(args) => search::run(search::Operation::Place, args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

/// Initialize logging to stderr, honouring RUST_LOG over `default_level`
pub fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
