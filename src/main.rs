//! doccache - labelled document cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use doccache::cli::{Cli, Commands};
use doccache::config::ConfigManager;
use doccache::error::CacheResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> CacheResult<()> {
    let cli = Cli::parse();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let mut config = config_manager.load()?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("doccache=warn"),
        1 => EnvFilter::new("doccache=info"),
        _ => EnvFilter::new("doccache=debug"),
    };

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
    }

    if let Some(dir) = cli.data_dir {
        debug!("Data directory overridden: {}", dir.display());
        config.cache.data_dir = Some(dir);
    }
    if let Some(subdir) = cli.subdir {
        config.cache.subdir = subdir;
    }

    match cli.command {
        Commands::Add(args) => doccache::cli::commands::add(args, &config),
        Commands::List(args) => doccache::cli::commands::list(args, &config),
        Commands::Find(args) => doccache::cli::commands::find(args, &config),
        Commands::Cat(args) => doccache::cli::commands::cat(args, &config),
        Commands::Config(args) => doccache::cli::commands::config(args, &config, &config_manager),
    }
}
