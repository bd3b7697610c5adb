//! The kernel context: registries, caches and exact decisions.
//!
//! Purpose
//! - Hand out one `CurveAnalysis` per canonical polynomial and one stored
//!   `CurvePairAnalysis` per unordered pair of curves.
//! - Memoize polynomial gcds and point comparisons.
//! - Answer `sign_at`, `compare_xy`, `solve` and `decompose` exactly, using
//!   algebraic certificates first and interval refinement as the fallback.
//!
//! Why this design
//! - Caches live in an explicitly constructed `Kernel` instead of process
//!   globals; dropping the kernel drops its caches. Handles already returned
//!   stay valid because they own their data through `Rc`.
//! - A kernel is single-threaded (`RefCell` caches). No cache borrow is held
//!   while a value is built, so building may call back into the kernel.
//! - Ids are assigned only when an insertion actually happens; a value built
//!   for a key that appeared meanwhile is discarded without consuming an id.
//!
//! Code cross-refs: `crate::cache`, `crate::analysis`, `XyCoordinate2`.

mod compare;
mod decompose;
mod point;
mod registry;
mod sign;
mod solve;

pub use decompose::Decomposition;
pub use point::{PointId, XyCoordinate2};

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::analysis::{CurveAnalysis, CurvePairAnalysis, SturmBuilder, TopologyBuilder};
use crate::cache::{CacheStats, CanonCache, Canonicalizer, SymmetricPairCache};
use crate::error::KernelError;
use crate::poly::BiPoly;

/// Cache capacities (entries).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelCfg {
    pub curve_cache_capacity: usize,
    pub pair_cache_capacity: usize,
    pub gcd_cache_capacity: usize,
    pub cmp_cache_capacity: usize,
}

impl Default for KernelCfg {
    fn default() -> Self {
        Self {
            curve_cache_capacity: 2048,
            pair_cache_capacity: 2048,
            gcd_cache_capacity: 1024,
            cmp_cache_capacity: 8192,
        }
    }
}

impl KernelCfg {
    pub fn validate(&self) -> Result<(), KernelError> {
        let caps = [
            ("curve", self.curve_cache_capacity),
            ("pair", self.pair_cache_capacity),
            ("gcd", self.gcd_cache_capacity),
            ("compare", self.cmp_cache_capacity),
        ];
        match caps.iter().find(|(_, c)| *c == 0) {
            Some(&(cache, _)) => Err(KernelError::InvalidCapacity { cache }),
            None => Ok(()),
        }
    }
}

/// Counters of all kernel caches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernelStats {
    pub curves: CacheStats,
    pub pairs: CacheStats,
    pub gcds: CacheStats,
    pub cmp_xy: CacheStats,
}

/// Curves are cached under their canonical polynomial.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PolyCanon;

impl Canonicalizer<BiPoly> for PolyCanon {
    fn canonicalize(&self, raw: BiPoly) -> BiPoly {
        raw.canonical()
    }
}

/// Both polynomials canonical, the smaller one (total order) first.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct UnorderedPolys;

impl Canonicalizer<(BiPoly, BiPoly)> for UnorderedPolys {
    fn canonicalize(&self, (p, q): (BiPoly, BiPoly)) -> (BiPoly, BiPoly) {
        let (p, q) = (p.canonical(), q.canonical());
        match p.cmp(&q) {
            Ordering::Greater => (q, p),
            _ => (p, q),
        }
    }
}

/// Memoizing algebraic-curve kernel.
pub struct Kernel {
    cfg: KernelCfg,
    builder: Rc<dyn TopologyBuilder>,
    curves: RefCell<CanonCache<BiPoly, CurveAnalysis, PolyCanon>>,
    pairs: RefCell<SymmetricPairCache<CurvePairAnalysis>>,
    gcds: RefCell<CanonCache<(BiPoly, BiPoly), BiPoly, UnorderedPolys>>,
    cmp_xy: RefCell<SymmetricPairCache<Ordering>>,
    next_curve_id: Cell<u64>,
    next_point_id: Cell<u64>,
}

impl Kernel {
    /// Kernel with default capacities and the reference topology builder.
    pub fn new() -> Self {
        Self::build(KernelCfg::default(), Rc::new(SturmBuilder))
    }

    pub fn with_cfg(cfg: KernelCfg) -> Result<Self, KernelError> {
        Self::with_builder(cfg, Rc::new(SturmBuilder))
    }

    /// Kernel whose curve and pair analyses come from `builder`.
    pub fn with_builder(
        cfg: KernelCfg,
        builder: Rc<dyn TopologyBuilder>,
    ) -> Result<Self, KernelError> {
        cfg.validate()?;
        Ok(Self::build(cfg, builder))
    }

    fn build(cfg: KernelCfg, builder: Rc<dyn TopologyBuilder>) -> Self {
        Self {
            cfg,
            builder,
            curves: RefCell::new(CanonCache::new("curve", cfg.curve_cache_capacity, PolyCanon)),
            pairs: RefCell::new(SymmetricPairCache::new("pair", cfg.pair_cache_capacity)),
            gcds: RefCell::new(CanonCache::new("gcd", cfg.gcd_cache_capacity, UnorderedPolys)),
            cmp_xy: RefCell::new(SymmetricPairCache::new("compare_xy", cfg.cmp_cache_capacity)),
            next_curve_id: Cell::new(0),
            next_point_id: Cell::new(0),
        }
    }

    pub fn cfg(&self) -> KernelCfg {
        self.cfg
    }

    pub fn stats(&self) -> KernelStats {
        KernelStats {
            curves: self.curves.borrow().stats(),
            pairs: self.pairs.borrow().stats(),
            gcds: self.gcds.borrow().stats(),
            cmp_xy: self.cmp_xy.borrow().stats(),
        }
    }

    /// Number of curves currently indexed (evicted curves are not counted).
    pub fn cached_curves(&self) -> usize {
        self.curves.borrow().len()
    }

    /// Forget every cached entry. Handles already returned stay valid, and
    /// ids keep increasing, so later analyses never collide with old ones.
    pub fn clear_caches(&self) {
        self.curves.borrow_mut().clear();
        self.pairs.borrow_mut().clear();
        self.gcds.borrow_mut().clear();
        self.cmp_xy.borrow_mut().clear();
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("cfg", &self.cfg)
            .field("builder", &self.builder)
            .field("curves", &self.curves.borrow().len())
            .field("pairs", &self.pairs.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
