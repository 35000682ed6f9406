//! pcparts CLI: the main entry point.
//!
//! Commands:
//! - `init`: Write a default config file
//! - `list`: Parts in one category
//! - `price-range`: Parts within a price band
//! - `suggest`: Balanced build for a budget
//! - `last-update`: Catalog freshness
//! - `import`: Replace the parts table from a JSON file
//! - `serve`: Start the HTTP gateway
//! - `stdio`: Serve JSON-RPC over stdin/stdout
//! - `status`: Show configuration and catalog status

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "pcparts",
    about = "pcparts: PC parts catalog queries and build suggestions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file to ~/.pcparts/config.toml
    Init,

    /// List every part in a category (cpu, gpu, motherboard, ram, psu, case)
    List {
        category: String,
    },

    /// Find parts priced within [MIN, MAX], inclusive
    PriceRange {
        min: f64,
        max: f64,
    },

    /// Suggest a six-part build for a total budget
    Suggest {
        budget: f64,
    },

    /// Show when prices were last updated
    LastUpdate,

    /// Replace the parts table with the records in a JSON file
    Import {
        file: PathBuf,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Serve tools over stdin/stdout (JSON-RPC 2.0)
    Stdio,

    /// Show configuration and catalog status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if matches!(cli.command, Commands::Stdio) {
        // stdout carries the protocol
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::List { category } => commands::query::list(&category).await?,
        Commands::PriceRange { min, max } => commands::query::price_range(min, max).await?,
        Commands::Suggest { budget } => commands::query::suggest(budget).await?,
        Commands::LastUpdate => commands::query::last_update().await?,
        Commands::Import { file } => commands::import::run(&file).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Stdio => commands::stdio::run().await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
