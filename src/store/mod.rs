//! Durable blob storage consumed by the cache
//!
//! The cache only ever talks to storage through [`Store`]: save a labelled
//! blob, list what is stored, and map a stored blob back into memory.
//! Unmapping is dropping the returned [`MappedBlob`].

pub mod dir;

pub use dir::StorageDir;

use crate::error::CacheResult;
use crate::labels::Labels;
use memmap2::Mmap;

/// Labelled blob storage keyed by opaque, store-assigned names
pub trait Store {
    /// Persist `data` tagged with `labels`, returning the new blob's name
    fn save_labelled(&self, labels: &Labels, data: &[u8]) -> CacheResult<String>;

    /// Names of every persisted blob, in a stable order
    fn list_names(&self) -> CacheResult<Vec<String>>;

    /// Map a stored blob and reconstruct its labels
    fn map_labelled(&self, name: &str) -> CacheResult<(Labels, MappedBlob)>;
}

/// Read-only mapping of a labelled file, exposing only its body
#[derive(Debug)]
pub struct MappedBlob {
    map: Mmap,
    body_start: usize,
}

impl MappedBlob {
    pub(crate) fn new(map: Mmap, body_start: usize) -> Self {
        debug_assert!(body_start <= map.len());
        Self { map, body_start }
    }

    /// Document bytes following the label header
    pub fn body(&self) -> &[u8] {
        &self.map[self.body_start..]
    }

    pub fn len(&self) -> usize {
        self.map.len() - self.body_start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
