//! CLI command implementations

pub mod add;
pub mod cat;
pub mod config;
pub mod find;
pub mod list;

pub use add::execute as add;
pub use cat::execute as cat;
pub use config::execute as config;
pub use find::execute as find;
pub use list::execute as list;

use crate::cache::Cache;
use crate::config::{Config, ConfigManager};
use crate::error::CacheResult;
use crate::store::StorageDir;

/// Open the storage directory described by the effective configuration
pub(crate) fn open_store(config: &Config) -> CacheResult<StorageDir> {
    let data_dir = ConfigManager::data_dir(config);
    StorageDir::open(data_dir.join(&config.cache.subdir), config.cache.max_entries)
}

/// Open the cache described by the effective configuration
pub(crate) fn open_cache(config: &Config) -> CacheResult<Cache> {
    Cache::with_store(open_store(config)?)
}
