//! Canonicalizing memo caches.
//!
//! Purpose
//! - Deduplicate expensive objects (curve analyses, pair analyses, gcds,
//!   point comparisons) by mapping every raw key to a canonical key first, so
//!   that equivalent requests (`2·f` and `f`, `(a, b)` and `(b, a)`) share one
//!   entry.
//! - Bound memory with least-recently-used eviction.
//!
//! Why this design
//! - Canonicalization is a trait parameter, so each cache states its notion
//!   of "same key" in its type.
//! - Values are cheap handles (`Rc`, `Copy` data). Eviction only forgets the
//!   index entry; clones already handed out stay valid.
//! - `lookup` and `insert_if_absent` are separate steps. `get_or_create_in`
//!   runs them on a cache held in a `RefCell` and releases the borrow while
//!   it builds a value, so builders may query the cache again.
//!
//! Code cross-refs: `SymmetricPairCache`, `crate::kernel::Kernel`.

mod pair;

pub use pair::{Identified, OrderedIds, SymmetricPairCache};

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use tracing::{debug, trace};

/// Maps a raw key to its canonical representative.
pub trait Canonicalizer<K> {
    fn canonicalize(&self, raw: K) -> K;
}

/// Keys that are already canonical.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<K> Canonicalizer<K> for Identity {
    fn canonicalize(&self, raw: K) -> K {
        raw
    }
}

/// Hit/miss/eviction counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

struct Slot<V> {
    value: V,
    stamp: u64,
}

/// LRU cache keyed by canonical keys.
pub struct CanonCache<K, V, C = Identity> {
    name: &'static str,
    canon: C,
    capacity: usize,
    entries: HashMap<K, Slot<V>>,
    recency: BTreeMap<u64, K>,
    tick: u64,
    stats: CacheStats,
}

impl<K, V, C> CanonCache<K, V, C>
where
    K: Clone + Eq + Hash,
    V: Clone,
    C: Canonicalizer<K>,
{
    /// `capacity` must be positive (see `KernelCfg::validate`).
    pub fn new(name: &'static str, capacity: usize, canon: C) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            name,
            canon,
            capacity,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            tick: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn canonicalize(&self, raw: K) -> K {
        self.canon.canonicalize(raw)
    }

    /// Stored value for a canonical key; counts a hit or a miss and marks
    /// the entry as most recently used.
    pub fn lookup(&mut self, key: &K) -> Option<V> {
        let stamp = self.next_tick();
        match self.entries.get_mut(key) {
            Some(slot) => {
                self.recency.remove(&slot.stamp);
                slot.stamp = stamp;
                self.recency.insert(stamp, key.clone());
                self.stats.hits += 1;
                trace!(cache = self.name, "hit");
                Some(slot.value.clone())
            }
            None => {
                self.stats.misses += 1;
                trace!(cache = self.name, "miss");
                None
            }
        }
    }

    /// Insert unless the key is present. Returns the stored value and whether
    /// this call inserted it.
    pub fn insert_if_absent(&mut self, key: K, value: V) -> (V, bool) {
        let stamp = self.next_tick();
        if let Some(slot) = self.entries.get_mut(&key) {
            self.recency.remove(&slot.stamp);
            slot.stamp = stamp;
            self.recency.insert(stamp, key);
            return (slot.value.clone(), false);
        }
        self.evict_to(self.capacity - 1);
        self.recency.insert(stamp, key.clone());
        self.entries.insert(
            key,
            Slot {
                value: value.clone(),
                stamp,
            },
        );
        (value, true)
    }

    /// Canonicalize `raw`, return the cached value or build, store and return
    /// a new one. `create` sees the canonical key.
    pub fn get_or_create(&mut self, raw: K, create: impl FnOnce(&K) -> V) -> V {
        let key = self.canonicalize(raw);
        if let Some(v) = self.lookup(&key) {
            return v;
        }
        let v = create(&key);
        self.insert_if_absent(key, v).0
    }

    /// `get_or_create` on a shared cache. No borrow is held while `create`
    /// runs; if the key shows up meanwhile, the stored value wins and the new
    /// one is dropped. Returns the value and whether this call inserted it.
    pub fn get_or_create_in(
        cell: &RefCell<Self>,
        raw: K,
        create: impl FnOnce(&K) -> V,
    ) -> (V, bool) {
        let key = cell.borrow().canonicalize(raw);
        let cached = cell.borrow_mut().lookup(&key);
        if let Some(v) = cached {
            return (v, false);
        }
        let v = create(&key);
        cell.borrow_mut().insert_if_absent(key, v)
    }

    /// Presence test without touching recency or stats.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every entry; stats are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_to(&mut self, target: usize) {
        while self.entries.len() > target {
            let Some((_, key)) = self.recency.pop_first() else {
                break;
            };
            self.entries.remove(&key);
            self.stats.evictions += 1;
            debug!(cache = self.name, len = self.entries.len(), "evicted least recently used entry");
        }
    }
}

#[cfg(test)]
mod tests;
