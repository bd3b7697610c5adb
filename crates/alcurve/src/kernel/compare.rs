//! Exact comparison of points, memoized per unordered point pair.

use std::cmp::Ordering;
use tracing::trace;

use super::{Kernel, XyCoordinate2};
use crate::analysis::CurveSide;
use crate::cache::SymmetricPairCache;
use crate::real::AlgebraicReal1;

impl Kernel {
    pub fn compare_x(&self, p: &XyCoordinate2, q: &XyCoordinate2) -> Ordering {
        p.x().compare(q.x())
    }

    pub fn compare_x_real(&self, a: &AlgebraicReal1, b: &AlgebraicReal1) -> Ordering {
        a.compare(b)
    }

    /// Compare y-coordinates only.
    pub fn compare_y(&self, p: &XyCoordinate2, q: &XyCoordinate2) -> Ordering {
        if p.is_identical(q) {
            return Ordering::Equal;
        }
        match self.compare_x(p, q) {
            Ordering::Equal => self.compare_xy(p, q, true),
            _ => p.y().compare(&q.y()),
        }
    }

    /// Lexicographic comparison, x first. With `equal_x` the caller asserts
    /// that the x-coordinates coincide, and only y is compared.
    pub fn compare_xy(&self, p: &XyCoordinate2, q: &XyCoordinate2, equal_x: bool) -> Ordering {
        if p.is_identical(q) {
            return Ordering::Equal;
        }
        if equal_x && p.curve().is_identical(&q.curve()) {
            return p.arcno().cmp(&q.arcno());
        }
        let (o, swapped) =
            SymmetricPairCache::get_or_create_symmetric_in(&self.cmp_xy, p, q, |lo, hi| {
                let o = self.compare_xy_uncached(lo, hi, equal_x);
                trace!(first = lo.id().0, second = hi.id().0, result = ?o, "compare_xy computed");
                o
            });
        if swapped {
            o.reverse()
        } else {
            o
        }
    }

    fn compare_xy_uncached(&self, p: &XyCoordinate2, q: &XyCoordinate2, equal_x: bool) -> Ordering {
        if !equal_x {
            let ox = self.compare_x(p, q);
            if ox != Ordering::Equal {
                return ox;
            }
        }
        let (cp, cq) = (p.curve(), q.curve());
        if cp.is_identical(&cq) {
            return p.arcno().cmp(&q.arcno());
        }
        let pair = self.construct_curve_pair(&cp, &cq);
        let line = pair.status_line_for_x(p.x());
        match (
            line.event_of_curve(p.arcno(), CurveSide::First),
            line.event_of_curve(q.arcno(), CurveSide::Second),
        ) {
            (Some(i), Some(j)) => i.cmp(&j),
            // a fiber vanished identically: fall back to the exact y-values
            _ => p.y().compare(&q.y()),
        }
    }
}
