//! The document cache: an ordered collection of entries over one store

use crate::cache::entry::Entry;
use crate::config::ConfigManager;
use crate::error::CacheResult;
use crate::labels::Labels;
use crate::store::{StorageDir, Store};
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Outcome of a rescan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RescanReport {
    /// Blobs turned into entries
    pub loaded: usize,
    /// Blobs that could not be mapped and were left out
    pub skipped: usize,
}

/// Cache of labelled documents backed by a [`Store`].
///
/// Holds one reference to each of its entries. Entries hold only a weak
/// link back to the store, so handles that outlive the cache keep their
/// labels (and body, if already mapped) but can no longer map.
pub struct Cache {
    store: Rc<dyn Store>,
    entries: Vec<Entry>,
}

impl Cache {
    /// Open `subdir` under the default data directory and rescan it
    pub fn open(subdir: &str, max_entries: usize) -> CacheResult<Self> {
        Self::open_in(&ConfigManager::default_data_dir(), subdir, max_entries)
    }

    /// Open `subdir` under `data_dir` and rescan it
    pub fn open_in(data_dir: &Path, subdir: &str, max_entries: usize) -> CacheResult<Self> {
        let store = StorageDir::open(data_dir.join(subdir), max_entries)?;
        Self::with_store(store)
    }

    /// Build a cache over an already opened store
    pub fn with_store(store: impl Store + 'static) -> CacheResult<Self> {
        let mut cache = Self {
            store: Rc::new(store),
            entries: Vec::new(),
        };
        let report = cache.rescan()?;
        info!(
            "Opened cache with {} documents ({} unreadable)",
            report.loaded, report.skipped
        );
        Ok(cache)
    }

    /// Rebuild the entry collection from what the store holds.
    ///
    /// Labels are read through a transient mapping; bodies stay unmapped.
    /// Blobs that fail to map are logged and skipped. The new collection
    /// replaces the old one only once it is complete, and the old
    /// collection's references are released afterwards.
    pub fn rescan(&mut self) -> CacheResult<RescanReport> {
        let names = self.store.list_names()?;
        let mut report = RescanReport::default();
        let mut fresh = Vec::with_capacity(names.len());

        for name in names {
            match self.store.map_labelled(&name) {
                Ok((labels, blob)) => {
                    drop(blob);
                    fresh.push(Entry::new(name, labels, Rc::downgrade(&self.store)));
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!("Skipping unreadable document {}: {}", name, e);
                    report.skipped += 1;
                }
            }
        }

        let previous = std::mem::replace(&mut self.entries, fresh);
        debug!(
            "Rescan replaced {} entries with {}",
            previous.len(),
            self.entries.len()
        );
        drop(previous);

        Ok(report)
    }

    /// Durably store `data` under `labels` and cache a new entry for it.
    ///
    /// On failure the cache is left untouched.
    pub fn add(&mut self, labels: &Labels, data: &[u8]) -> CacheResult<Entry> {
        let name = self.store.save_labelled(labels, data)?;
        let entry = Entry::new(name, labels.clone(), Rc::downgrade(&self.store));
        self.entries.push(entry.clone());
        debug!("Added {} ({})", entry.name(), labels);
        Ok(entry)
    }

    /// All cached entries, in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        debug!("Closing cache with {} entries", self.entries.len());
    }
}
