//! Swatch CLI - design-system component catalog.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::GlobalOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "swatch=debug" } else { "swatch=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let options = GlobalOptions {
        config: cli.config,
        store_dir: cli.store_dir,
        remote: cli.remote,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Load { json } => commands::load::run(&options, json).await,

        Commands::List {
            level,
            status,
            tag,
            query,
            json,
        } => commands::list::run(&options, level, status, tag, query, json).await,

        Commands::Show { id, json } => commands::show::run(&options, id, json).await,

        Commands::Stats { json } => commands::stats::run(&options, json).await,

        Commands::Import { file, dry_run } => commands::import::run(&options, file, dry_run).await,

        Commands::Export {
            output,
            include_builtins,
            no_metadata,
        } => commands::export::run(&options, output, include_builtins, no_metadata).await,

        Commands::Remove { id } => commands::remove::run(&options, id),

        Commands::ClearCache => commands::clear_cache::run(&options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
