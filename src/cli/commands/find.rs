//! Find command - look documents up by label

use crate::cli::args::FindArgs;
use crate::cli::commands::list::print_entries;
use crate::cli::commands::open_cache;
use crate::config::Config;
use crate::error::CacheResult;
use tracing::debug;

/// Execute the find command
pub fn execute(args: FindArgs, config: &Config) -> CacheResult<()> {
    let cache = open_cache(config)?;

    let found = if args.all {
        cache.find_all(&args.key, &args.value)
    } else {
        cache.find_first(&args.key, &args.value).into_iter().collect()
    };

    debug!(
        "{} of {} documents match {}={}",
        found.len(),
        cache.len(),
        args.key,
        args.value
    );
    print_entries(&found, args.format)
}
