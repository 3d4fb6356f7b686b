//! Reference-counted handle to one stored document
//!
//! Labels are always resident. The body is mapped through the owning
//! cache's store on first access and stays mapped until the last handle
//! is dropped.

use crate::error::{CacheError, CacheResult};
use crate::labels::Labels;
use crate::store::{MappedBlob, Store};
use std::cell::{Cell, OnceCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Shared handle to a cached document.
///
/// Cloning takes another reference; dropping releases one. When the last
/// reference goes away the mapping is released along with the labels.
#[derive(Clone)]
pub struct Entry {
    inner: Rc<EntryInner>,
}

struct EntryInner {
    /// Store-assigned blob name
    name: String,
    labels: Labels,
    /// Store of the cache that produced this entry; dead once the cache is dropped
    owner: Weak<dyn Store>,
    removal_requested: Cell<bool>,
    body: OnceCell<MappedBlob>,
}

impl Entry {
    pub(crate) fn new(name: String, labels: Labels, owner: Weak<dyn Store>) -> Self {
        Self {
            inner: Rc::new(EntryInner {
                name,
                labels,
                owner,
                removal_requested: Cell::new(false),
                body: OnceCell::new(),
            }),
        }
    }

    /// Store-assigned name of the underlying blob
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Full label set, in stored order
    pub fn labels(&self) -> &Labels {
        &self.inner.labels
    }

    /// Value of the first label under `key`
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.inner.labels.get(key)
    }

    /// Whether the first label under `key` is exactly `value`
    pub fn matches(&self, key: &str, value: &str) -> bool {
        self.get_value(key) == Some(value)
    }

    /// Document body, mapping it through the owning cache on first use.
    ///
    /// Fails if the body was never mapped and the owning cache is gone, or
    /// if the store cannot map the blob. Later calls reuse the mapping.
    pub fn body(&self) -> CacheResult<&[u8]> {
        if let Some(blob) = self.inner.body.get() {
            return Ok(blob.body());
        }

        let store = self.inner.owner.upgrade().ok_or_else(|| CacheError::Orphaned {
            name: self.inner.name.clone(),
        })?;

        // Labels are already resident; only the mapping is kept.
        let (_, blob) = store.map_labelled(&self.inner.name)?;
        debug!("Mapped {} ({} bytes)", self.inner.name, blob.len());

        Ok(self.inner.body.get_or_init(|| blob).body())
    }

    /// Whether the body is currently mapped
    pub fn is_mapped(&self) -> bool {
        self.inner.body.get().is_some()
    }

    /// Whether the cache that produced this entry is still open
    pub fn has_owner(&self) -> bool {
        self.inner.owner.strong_count() > 0
    }

    /// Flag this document for removal.
    ///
    /// Advisory only: the file stays on disk and the entry stays cached.
    pub fn mark_for_removal(&self) {
        self.inner.removal_requested.set(true);
    }

    pub fn removal_requested(&self) -> bool {
        self.inner.removal_requested.get()
    }

    /// Number of live handles to this entry, including the cache's own
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Whether two handles refer to the same entry
    pub fn same_entry(&self, other: &Entry) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.inner.name)
            .field("labels", &self.inner.labels)
            .field("ref_count", &self.ref_count())
            .field("mapped", &self.is_mapped())
            .field("removal_requested", &self.removal_requested())
            .finish()
    }
}

impl Drop for EntryInner {
    fn drop(&mut self) {
        trace!(
            "Releasing entry {} (mapped: {})",
            self.name,
            self.body.get().is_some()
        );
    }
}
