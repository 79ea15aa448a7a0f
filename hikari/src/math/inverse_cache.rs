use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        PoisonError, RwLock,
    },
};

use super::matrix::Matrix4;
use crate::{hikari_info, hikari_trace};

pub const DEFAULT_INVERSE_CACHE_CAPACITY: usize = 4096;

type Key = [u64; 16];

#[derive(Default)]
struct Entries {
    inverses: HashMap<Key, Matrix4>,
    // Insertion order for eviction
    order: VecDeque<Key>,
}

/// Memoizes [`Matrix4`] inverses keyed by the exact bit pattern of the matrix.
///
/// The cache is bounded: once `capacity` entries are stored, the oldest
/// insertion is evicted first. A capacity of zero disables storage entirely.
/// Share one between the transforms of a scene by reference or in an `Arc`.
pub struct InverseCache {
    capacity: usize,
    entries: RwLock<Entries>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl InverseCache {
    /// Creates a new `InverseCache` holding at most `capacity` inverses.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(Entries::default()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Returns the inverse of `m`, computing and storing it on a miss.
    ///
    /// Panics if `m` is singular.
    pub fn inverse(&self, m: &Matrix4) -> Matrix4 {
        let key = m.key();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(mi) = entries.inverses.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return *mi;
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let mi = m.inverted();
        if self.capacity == 0 {
            return mi;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread might have raced us here
        if entries.inverses.insert(key, mi).is_none() {
            entries.order.push_back(key);
            while entries.order.len() > self.capacity {
                if let Some(oldest) = entries.order.pop_front() {
                    entries.inverses.remove(&oldest);
                    hikari_trace!("Inverse cache: Evicted oldest of {} entries", self.capacity);
                }
            }
        }
        mi
    }

    /// Returns the maximum number of stored inverses.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of currently stored inverses.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .inverses
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of lookups served from the cache.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that had to invert.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Logs the entry count and the hit rate so far.
    pub fn log_stats(&self) {
        let (hits, misses) = (self.hits(), self.misses());
        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };
        hikari_info!(
            "Inverse cache: {}/{} entries, {} hits, {} misses ({:.1}% hit rate)",
            self.len(),
            self.capacity,
            hits,
            misses,
            hit_rate * 100.0
        );
    }

    /// Drops all stored inverses and resets the counters.
    ///
    /// The statistics up to this point are logged first.
    pub fn clear(&self) {
        self.log_stats();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.inverses.clear();
        entries.order.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for InverseCache {
    fn default() -> Self {
        Self::new(DEFAULT_INVERSE_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for InverseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InverseCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}
