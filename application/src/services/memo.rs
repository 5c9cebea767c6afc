//! Memoized lookup table
//!
//! [`MemoTable`] caches the result of a pure function per key, bounded by a
//! fixed entry count.
//!
//! # Concurrency
//!
//! Each key owns a [`tokio::sync::OnceCell`]. The table-wide mutex only
//! guards bookkeeping (finding or creating the cell, access stamps) and is
//! never held while the function runs, so lookups for different keys do not
//! serialize. Concurrent callers for the same uncached key wait on the same
//! cell, which guarantees at most one computation per key.
//!
//! # Eviction
//!
//! Least recently used. Every `get` stamps its entry with a logical clock;
//! inserting a new key into a full table first removes the computed entry
//! with the oldest stamp. Entries whose computation is still in flight are
//! never evicted, since a new cell for their key would run the function a
//! second time. When every entry is in flight the table briefly exceeds its
//! capacity and shrinks back on a later insert.
//!
//! # Failure
//!
//! If the function fails, the error goes back to the caller and the key is
//! left uncached so a later call retries.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;
use tracing::trace;

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 100;

/// Counters describing table usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

struct Slot<V> {
    cell: Arc<OnceCell<V>>,
    last_used: u64,
}

struct Inner<K, V> {
    slots: HashMap<K, Slot<V>>,
    clock: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K: Eq + Hash + Clone, V> Inner<K, V> {
    /// Remove the least recently used computed entry, if any
    fn evict_lru(&mut self) -> bool {
        let victim = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.cell.initialized())
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone());

        match victim {
            Some(key) => {
                self.slots.remove(&key);
                self.evictions += 1;
                true
            }
            None => false,
        }
    }
}

/// Bounded, thread-safe memoization table
pub struct MemoTable<K, V> {
    name: &'static str,
    capacity: usize,
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> MemoTable<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + std::fmt::Debug,
    V: Clone + Send + Sync,
{
    /// Create a table holding at most `capacity` entries (minimum 1)
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity: capacity.max(1),
            inner: Mutex::new(Inner {
                slots: HashMap::new(),
                clock: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
        }
    }

    /// Return the cached value for `key`, computing it with `compute` on a miss.
    pub async fn get<E, F>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E> + Send,
    {
        let cell = self.cell_for(&key);

        let mut computed = false;
        let result = cell
            .get_or_try_init(|| {
                computed = true;
                async { compute(&key) }
            })
            .await
            .cloned();

        let mut inner = self.lock();
        match &result {
            Ok(_) if computed => {
                inner.misses += 1;
                trace!(table = self.name, key = ?key, "memo miss");
            }
            Ok(_) => inner.hits += 1,
            Err(_) => {
                inner.misses += 1;
                // Only drop the slot we were working on; a newer one may have replaced it
                let stale = inner
                    .slots
                    .get(&key)
                    .is_some_and(|slot| Arc::ptr_eq(&slot.cell, &cell) && !slot.cell.initialized());
                if stale {
                    inner.slots.remove(&key);
                }
            }
        }

        result
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock()
            .slots
            .get(key)
            .is_some_and(|slot| slot.cell.initialized())
    }

    pub fn stats(&self) -> MemoStats {
        let inner = self.lock();
        MemoStats {
            entries: inner.slots.len(),
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }

    /// Find or create the cell for `key`, stamping it as most recently used
    fn cell_for(&self, key: &K) -> Arc<OnceCell<V>> {
        let mut inner = self.lock();
        inner.clock += 1;
        let now = inner.clock;

        if let Some(slot) = inner.slots.get_mut(key) {
            slot.last_used = now;
            return Arc::clone(&slot.cell);
        }

        while inner.slots.len() >= self.capacity && inner.evict_lru() {
            trace!(table = self.name, "memo eviction");
        }

        let cell = Arc::new(OnceCell::new());
        inner.slots.insert(
            key.clone(),
            Slot {
                cell: Arc::clone(&cell),
                last_used: now,
            },
        );
        cell
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        // Bookkeeping stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
