use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Canonical form of an integer key: its absolute value.
#[derive(Clone, Copy, Default)]
struct AbsValue;

impl Canonicalizer<i64> for AbsValue {
    fn canonicalize(&self, raw: i64) -> i64 {
        raw.abs()
    }
}

#[test]
fn equivalent_keys_share_one_entry() {
    let mut cache = CanonCache::new("test", 8, AbsValue);
    let builds = Cell::new(0);
    let a = cache.get_or_create(-3, |k| {
        builds.set(builds.get() + 1);
        Rc::new(*k * 10)
    });
    let b = cache.get_or_create(3, |k| {
        builds.set(builds.get() + 1);
        Rc::new(*k * 10)
    });
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(*a, 30);
    assert_eq!(builds.get(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            evictions: 0
        }
    );
}

#[test]
fn lru_eviction_keeps_handed_out_values_usable() {
    let mut cache = CanonCache::new("test", 2, Identity);
    let one = cache.get_or_create(1u32, |_| Rc::new("one"));
    cache.get_or_create(2, |_| Rc::new("two"));
    // touch 1 so that 2 is the least recently used entry
    assert!(cache.lookup(&1).is_some());
    cache.get_or_create(3, |_| Rc::new("three"));
    assert!(cache.contains(&1));
    assert!(!cache.contains(&2));
    assert!(cache.contains(&3));
    assert_eq!(cache.stats().evictions, 1);

    cache.get_or_create(4, |_| Rc::new("four"));
    assert!(!cache.contains(&1));
    // the evicted value is still alive through the returned handle
    assert_eq!(*one, "one");
    let again = cache.get_or_create(1, |_| Rc::new("one"));
    assert!(!Rc::ptr_eq(&one, &again));
}

#[test]
fn insert_if_absent_keeps_the_first_value() {
    let mut cache: CanonCache<u8, &str> = CanonCache::new("test", 4, Identity);
    assert_eq!(cache.insert_if_absent(7, "first"), ("first", true));
    assert_eq!(cache.insert_if_absent(7, "second"), ("first", false));
    cache.clear();
    assert!(cache.is_empty());
}

struct Obj(u64);

impl Identified for Obj {
    fn identity(&self) -> u64 {
        self.0
    }
}

#[test]
fn symmetric_cache_reports_swapped_order() {
    let mut cache = SymmetricPairCache::new("pairs", 16);
    let (a, b) = (Obj(4), Obj(9));
    let (v1, s1) = cache.get_or_create_symmetric(&a, &b, |lo, hi| (lo.0, hi.0));
    let (v2, s2) = cache.get_or_create_symmetric(&b, &a, |_, _| unreachable!());
    assert_eq!(v1, (4, 9));
    assert_eq!(v2, (4, 9));
    assert!(!s1);
    assert!(s2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn shared_cache_releases_borrow_while_building() {
    let cell = RefCell::new(CanonCache::new("test", 8, AbsValue));
    let (outer, inserted) = CanonCache::get_or_create_in(&cell, -2, |k| {
        // the builder may use the cache itself
        let (inner, _) = CanonCache::get_or_create_in(&cell, 5, |k| *k);
        *k * 100 + inner
    });
    assert_eq!((outer, inserted), (205, true));
    assert_eq!(CanonCache::get_or_create_in(&cell, 2, |_| unreachable!()), (205, false));
    assert_eq!(cell.borrow().len(), 2);
    // a value inserted while the builder ran takes precedence
    let (v, inserted) = CanonCache::get_or_create_in(&cell, 7, |_| {
        cell.borrow_mut().insert_if_absent(7, 1);
        2
    });
    assert_eq!((v, inserted), (1, false));
}

#[test]
fn shared_symmetric_cache_reports_swapped_order() {
    let cell = RefCell::new(SymmetricPairCache::new("pairs", 4));
    let (a, b) = (Obj(9), Obj(4));
    let (v, swapped) = SymmetricPairCache::get_or_create_symmetric_in(&cell, &a, &b, |lo, hi| {
        assert!(cell.borrow().is_empty());
        (lo.0, hi.0)
    });
    assert_eq!(v, (4, 9));
    assert!(swapped);
    let (v, swapped) =
        SymmetricPairCache::get_or_create_symmetric_in(&cell, &b, &a, |_, _| unreachable!());
    assert_eq!(v, (4, 9));
    assert!(!swapped);
    assert_eq!(cell.borrow().stats().hits, 1);
}

#[test]
fn symmetric_cache_builds_from_canonical_order() {
    let mut cache = SymmetricPairCache::new("pairs", 16);
    let (hi, lo) = (Obj(30), Obj(2));
    let (v, swapped) = cache.get_or_create_symmetric(&hi, &lo, |first, second| {
        assert!(first.0 < second.0);
        first.0 * 100 + second.0
    });
    assert_eq!(v, 230);
    assert!(swapped);
}
