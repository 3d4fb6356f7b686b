//! doccache - labelled document cache
//!
//! Stores immutable documents on disk together with ordered key/value
//! labels, finds them again by label equality, and hands out
//! reference-counted entries whose bodies are memory-mapped on demand.
//!
//! ```no_run
//! use doccache::{Cache, Labels};
//!
//! # fn main() -> doccache::CacheResult<()> {
//! let mut cache = Cache::open("consensus-cache", 128)?;
//! let labels: Labels = [("type", "consensus"), ("flavor", "ns")].into_iter().collect();
//! cache.add(&labels, b"network-status-version 3\n")?;
//!
//! if let Some(entry) = cache.find_first("flavor", "ns") {
//!     let body = entry.body()?;
//!     println!("{} bytes", body.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod labels;
pub mod store;

pub use cache::{filter, Cache, Entry, RescanReport};
pub use error::{CacheError, CacheResult};
pub use labels::Labels;
pub use store::{MappedBlob, StorageDir, Store};
