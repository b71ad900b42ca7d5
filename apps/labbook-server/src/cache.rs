//! Short-TTL in-process cache fronting repeated document reads.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<T> {
    value: T,
    inserted: Instant,
}

/// Keyed cache with a fixed per-entry TTL measured from insertion.
///
/// Nothing evicts eagerly; staleness is detected lazily on read (an
/// expired entry is removed and treated as absent). There is no
/// per-entry locking: concurrent readers may both miss and re-fetch,
/// and the last writer wins. Acceptable because values are read-mostly
/// and re-derivable from the store.
pub struct ObjectCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T: Clone> ObjectCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.inserted.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: &str, value: T) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            Entry {
                value,
                inserted: Instant::now(),
            },
        );
    }

    pub fn delete(&self, key: &str) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.remove(key);
    }
}
