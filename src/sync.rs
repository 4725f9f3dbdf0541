//! Per-key async serialization.
//!
//! Concurrent operations touching the same record must observe each
//! other's writes; operations on different records must not contend.
//! [`KeyedLocks`] hands out one async mutex per key on demand.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

/// A lazily-populated map of async mutexes, one per key.
///
/// Guards are owned, so they can be held across await points and across
/// the scope that acquired them. Mutex entries are never removed; the
/// key space (employees, dates, balance keys) is small and bounded by
/// the workforce.
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<tokio::sync::Mutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        KeyedLocks {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty lock map.
    pub fn new() -> Self {
        KeyedLocks::default()
    }

    /// Acquires the mutex for `key`, creating it on first use.
    pub async fn lock(&self, key: K) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut locks = self.locks.lock().expect("poisoned lock");
            Arc::clone(locks.entry(key).or_default())
        };
        mutex.lock_owned().await
    }
}

impl<K> std::fmt::Debug for KeyedLocks<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedLocks").finish_non_exhaustive()
    }
}
