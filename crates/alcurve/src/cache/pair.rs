//! Order-independent cache over pairs of identified objects.

use std::cell::RefCell;

use super::{CacheStats, CanonCache, Canonicalizer};

/// Objects with a stable numeric identity. Two objects are the same for
/// caching purposes iff their ids are equal.
pub trait Identified {
    fn identity(&self) -> u64;
}

/// Canonical order of an id pair: smaller id first.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedIds;

impl Canonicalizer<(u64, u64)> for OrderedIds {
    fn canonicalize(&self, (a, b): (u64, u64)) -> (u64, u64) {
        if a > b {
            (b, a)
        } else {
            (a, b)
        }
    }
}

/// Cache keyed by unordered pairs of ids.
///
/// Values are stored for the canonical orientation `(lower id, higher id)`.
/// Every query reports whether its argument order was swapped relative to
/// that orientation; the flag is a property of the query, never stored.
pub struct SymmetricPairCache<V> {
    inner: CanonCache<(u64, u64), V, OrderedIds>,
}

impl<V: Clone> SymmetricPairCache<V> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            inner: CanonCache::new(name, capacity, OrderedIds),
        }
    }

    /// Look up `{a, b}`, building the value from the canonically ordered
    /// objects on a miss. Returns the value and the swapped flag.
    pub fn get_or_create_symmetric<T: Identified>(
        &mut self,
        a: &T,
        b: &T,
        create: impl FnOnce(&T, &T) -> V,
    ) -> (V, bool) {
        let swapped = a.identity() > b.identity();
        let (lo, hi) = if swapped { (b, a) } else { (a, b) };
        let value = self
            .inner
            .get_or_create((lo.identity(), hi.identity()), |_| create(lo, hi));
        (value, swapped)
    }

    /// `get_or_create_symmetric` on a shared cache; the borrow is released
    /// while `create` runs.
    pub fn get_or_create_symmetric_in<T: Identified>(
        cell: &RefCell<Self>,
        a: &T,
        b: &T,
        create: impl FnOnce(&T, &T) -> V,
    ) -> (V, bool) {
        let swapped = a.identity() > b.identity();
        let (lo, hi) = if swapped { (b, a) } else { (a, b) };
        let key = (lo.identity(), hi.identity());
        let cached = cell.borrow_mut().inner.lookup(&key);
        if let Some(v) = cached {
            return (v, swapped);
        }
        let v = create(lo, hi);
        let (v, _) = cell.borrow_mut().inner.insert_if_absent(key, v);
        (v, swapped)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
