//! Label equality lookups over cached entries

use crate::cache::entry::Entry;
use crate::cache::registry::Cache;

/// Keep only the entries whose first label under `key` equals `value`.
///
/// Entries without `key` never match. Relative order is preserved.
pub fn filter(entries: &mut Vec<Entry>, key: &str, value: &str) {
    entries.retain(|entry| entry.matches(key, value));
}

impl Cache {
    /// First entry, in collection order, labelled `key`=`value`
    pub fn find_first(&self, key: &str, value: &str) -> Option<Entry> {
        self.entries()
            .iter()
            .find(|entry| entry.matches(key, value))
            .cloned()
    }

    /// Every entry labelled `key`=`value`, in collection order
    pub fn find_all(&self, key: &str, value: &str) -> Vec<Entry> {
        let mut found = self.entries().to_vec();
        filter(&mut found, key, value);
        found
    }
}
