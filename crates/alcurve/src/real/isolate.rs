//! Generic real-root isolation by counting and bisection.

use num_rational::BigRational;

use super::interval::Interval;
use crate::poly::{sign_variations, UPoly};

/// Root counting oracle for a fixed polynomial.
pub(crate) trait RootCounter {
    fn is_root(&mut self, t: &BigRational) -> bool;
    /// Number of distinct roots in `(a, b]`; `a` and `b` must not be roots.
    fn count(&mut self, a: &BigRational, b: &BigRational) -> usize;
}

/// Sturm-sequence counter for a polynomial in `Q[t]`.
pub(crate) struct SturmCounter<'a> {
    pub seq: &'a [UPoly],
}

impl RootCounter for SturmCounter<'_> {
    fn is_root(&mut self, t: &BigRational) -> bool {
        self.seq[0].sign_at(t) == super::Sign::Zero
    }

    fn count(&mut self, a: &BigRational, b: &BigRational) -> usize {
        sign_variations(self.seq, a).saturating_sub(sign_variations(self.seq, b))
    }
}

/// A rational strictly inside `(a, b)` that is not a root. Tries the
/// midpoint first, then `a + (b-a)·j/k` for growing `k`.
pub(crate) fn split_point<C: RootCounter + ?Sized>(
    c: &mut C,
    a: &BigRational,
    b: &BigRational,
) -> BigRational {
    let w = b - a;
    let mut k: i64 = 2;
    loop {
        for j in 1..k {
            let t = a + &w * BigRational::new(j.into(), k.into());
            if !c.is_root(&t) {
                return t;
            }
        }
        k += 1;
    }
}

/// Isolating intervals, ascending, for all roots in `(lo, hi)`; `lo` and
/// `hi` must not be roots. Each open interval contains exactly one root and
/// has non-root endpoints.
pub(crate) fn isolate<C: RootCounter + ?Sized>(
    c: &mut C,
    lo: BigRational,
    hi: BigRational,
) -> Vec<Interval> {
    let mut out = Vec::new();
    let n = c.count(&lo, &hi);
    bisect(c, lo, hi, n, &mut out);
    out
}

fn bisect<C: RootCounter + ?Sized>(
    c: &mut C,
    a: BigRational,
    b: BigRational,
    n: usize,
    out: &mut Vec<Interval>,
) {
    match n {
        0 => {}
        1 => out.push(Interval::new(a, b)),
        _ => {
            let m = split_point(c, &a, &b);
            let left = c.count(&a, &m);
            bisect(c, a, m.clone(), left, out);
            bisect(c, m, b, n - left, out);
        }
    }
}

/// Halve an isolating interval (collapsing it to a point on an exact hit).
pub(crate) fn refine_isolated<C: RootCounter + ?Sized>(c: &mut C, iv: &mut Interval) {
    if iv.is_point() {
        return;
    }
    let m = iv.mid();
    if c.is_root(&m) {
        *iv = Interval::point(m);
    } else if c.count(&iv.lo, &m) == 1 {
        iv.hi = m;
    } else {
        iv.lo = m;
    }
}
