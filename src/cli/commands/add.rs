//! Add command - store a document

use crate::cli::args::AddArgs;
use crate::cli::commands::open_cache;
use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use crate::labels::Labels;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

/// Label holding the hex SHA-256 of the body
pub const DIGEST_LABEL: &str = "sha256-digest";

/// Execute the add command
pub fn execute(args: AddArgs, config: &Config) -> CacheResult<()> {
    let data = read_input(args.file.as_deref())?;

    let mut labels: Labels = args.labels.into_iter().collect();
    if !labels.contains_key(DIGEST_LABEL) {
        labels.push(DIGEST_LABEL, hex::encode(Sha256::digest(&data)));
    }

    let mut cache = open_cache(config)?;
    let entry = cache.add(&labels, &data)?;

    info!("Stored {} bytes as {}", data.len(), entry.name());
    println!("{}", entry.name());
    Ok(())
}

fn read_input(file: Option<&Path>) -> CacheResult<Vec<u8>> {
    match file {
        Some(path) if path != Path::new("-") => fs::read(path)
            .map_err(|e| CacheError::io(format!("reading {}", path.display()), e)),
        _ => {
            let mut data = Vec::new();
            io::stdin()
                .read_to_end(&mut data)
                .map_err(|e| CacheError::io("reading stdin", e))?;
            Ok(data)
        }
    }
}
