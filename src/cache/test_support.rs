//! Store wrapper that counts map calls

use crate::error::CacheResult;
use crate::labels::Labels;
use crate::store::{MappedBlob, StorageDir, Store};
use std::cell::Cell;
use std::rc::Rc;
use tempfile::TempDir;

#[derive(Clone)]
pub(crate) struct CountingStore {
    inner: Rc<StorageDir>,
    maps: Rc<Cell<usize>>,
}

impl CountingStore {
    pub(crate) fn in_tempdir(max_files: usize) -> (Self, TempDir) {
        let temp = TempDir::new().unwrap();
        let dir = StorageDir::open(temp.path().join("docs"), max_files).unwrap();
        let store = Self {
            inner: Rc::new(dir),
            maps: Rc::new(Cell::new(0)),
        };
        (store, temp)
    }

    pub(crate) fn map_calls(&self) -> usize {
        self.maps.get()
    }

    pub(crate) fn dir(&self) -> &StorageDir {
        &self.inner
    }
}

impl Store for CountingStore {
    fn save_labelled(&self, labels: &Labels, data: &[u8]) -> CacheResult<String> {
        self.inner.save_labelled(labels, data)
    }

    fn list_names(&self) -> CacheResult<Vec<String>> {
        self.inner.list_names()
    }

    fn map_labelled(&self, name: &str) -> CacheResult<(Labels, MappedBlob)> {
        self.maps.set(self.maps.get() + 1);
        self.inner.map_labelled(name)
    }
}
