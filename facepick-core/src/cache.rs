//! Keyed preview cache shared between the UI loop and render jobs

use crate::preview::{CacheEntry, Previews};
use crate::settings::PreviewKey;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of an atomic lookup-or-mark
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A job has already started (or finished) for this key
    Hit(CacheEntry),
    /// Nothing was there; the key is now marked pending and the caller owns the job
    Miss,
}

/// Preview cache keyed by settings and pixel dimensions.
///
/// Every read and write goes through one mutex around the whole map. Entries
/// are replaced wholesale, so a reader never sees samples from two renders.
/// Entries are never evicted.
#[derive(Debug, Default)]
pub struct PreviewCache {
    entries: Mutex<HashMap<PreviewKey, CacheEntry>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entry for `key`; `None` means no job was ever started
    pub fn lookup(&self, key: &PreviewKey) -> Option<CacheEntry> {
        self.entries.lock().get(key).cloned()
    }

    /// Mark `key` as in flight. Returns false if an entry already exists, in
    /// which case nothing changes.
    pub fn begin(&self, key: PreviewKey) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, CacheEntry::Pending);
        true
    }

    /// Look up `key` and, on a miss, mark it pending in the same critical section
    pub fn lookup_or_begin(&self, key: &PreviewKey) -> Lookup {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) => Lookup::Hit(entry.clone()),
            None => {
                entries.insert(key.clone(), CacheEntry::Pending);
                Lookup::Miss
            }
        }
    }

    /// Replace the entry for `key` with the finished previews
    pub fn complete(&self, key: &PreviewKey, previews: Previews) {
        let entry = CacheEntry::Ready(Arc::new(previews));
        self.entries.lock().insert(key.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
