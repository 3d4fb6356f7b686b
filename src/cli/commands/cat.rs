//! Cat command - write a document body to stdout

use crate::cli::args::CatArgs;
use crate::cli::commands::open_cache;
use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use std::io::{self, Write};

/// Execute the cat command
pub fn execute(args: CatArgs, config: &Config) -> CacheResult<()> {
    let cache = open_cache(config)?;
    let entry = cache
        .find_first(&args.key, &args.value)
        .ok_or_else(|| CacheError::NotFound {
            key: args.key.clone(),
            value: args.value.clone(),
        })?;

    let body = entry.body()?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(body)
        .and_then(|()| stdout.flush())
        .map_err(|e| CacheError::io("writing to stdout", e))
}
