//! List command - show cached documents

use crate::cache::{Cache, Entry};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::cli::commands::open_store;
use crate::config::Config;
use crate::error::CacheResult;
use crate::labels::Labels;
use console::style;
use serde::Serialize;

/// Execute the list command
pub fn execute(args: ListArgs, config: &Config) -> CacheResult<()> {
    let store = open_store(config)?;
    let (files, bytes) = store.usage()?;
    let max_files = store.max_files();

    let cache = Cache::with_store(store)?;
    print_entries(cache.entries(), args.format)?;

    if matches!(args.format, OutputFormat::Table) {
        println!(
            "Storage: {}/{} files, {}",
            files,
            max_files,
            format_bytes(bytes)
        );
    }
    Ok(())
}

/// Format bytes as human-readable size (e.g., "1.5 MB")
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Print entries in the requested format
pub(crate) fn print_entries(entries: &[Entry], format: OutputFormat) -> CacheResult<()> {
    if entries.is_empty() {
        match format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("{}", style("No documents found").dim()),
        }
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(entries),
        OutputFormat::Json => print_json(entries)?,
        OutputFormat::Plain => print_plain(entries),
    }

    Ok(())
}

fn print_table(entries: &[Entry]) {
    println!("{:<34} {}", style("NAME").bold(), style("LABELS").bold());
    println!("{}", "-".repeat(80));

    for entry in entries {
        println!("{:<34} {}", entry.name(), entry.labels());
    }

    println!();
    println!("{} document(s)", entries.len());
}

fn print_json(entries: &[Entry]) -> CacheResult<()> {
    #[derive(Serialize)]
    struct EntryJson<'a> {
        name: &'a str,
        labels: &'a Labels,
    }

    let json_entries: Vec<EntryJson<'_>> = entries
        .iter()
        .map(|e| EntryJson {
            name: e.name(),
            labels: e.labels(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json_entries)?);
    Ok(())
}

fn print_plain(entries: &[Entry]) {
    for entry in entries {
        println!("{}", entry.name());
    }
}
