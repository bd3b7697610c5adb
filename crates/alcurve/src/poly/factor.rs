//! Square-free factorization and coprime decomposition of curves.

use std::collections::BTreeMap;

use super::bipoly::BiPoly;

impl BiPoly {
    /// Square-free factorization up to a constant factor.
    ///
    /// Returns canonical factors paired with their multiplicity, ascending by
    /// multiplicity, at most one factor per multiplicity. The `y`-content is
    /// factored in `Q[x]`, the primitive part by Yun's algorithm with respect
    /// to `y`; factors of equal multiplicity are merged.
    pub fn square_free_factorization(&self) -> Vec<(BiPoly, usize)> {
        if self.total_degree() == 0 {
            return Vec::new();
        }
        let mut groups: BTreeMap<usize, BiPoly> = BTreeMap::new();
        let mut put = |p: BiPoly, m: usize| {
            let slot = groups.entry(m).or_insert_with(BiPoly::one);
            *slot = &*slot * &p;
        };
        for (c, m) in self.content_y().square_free_factorization() {
            put(BiPoly::from_x(c), m);
        }
        let pp = self.primitive_part_y();
        if pp.degree_y() > 0 {
            let fp = pp.derivative_y();
            let a0 = pp.gcd(&fp);
            let mut b = pp.quo(&a0);
            let c = fp.quo(&a0);
            let mut d = &c - &b.derivative_y();
            let mut i = 1;
            while b.degree_y() > 0 {
                let a = b.gcd(&d);
                b = b.quo(&a);
                let c = d.quo(&a);
                d = &c - &b.derivative_y();
                if a.degree_y() > 0 {
                    put(a, i);
                }
                i += 1;
            }
        }
        groups
            .into_iter()
            .map(|(m, p)| (p.canonical(), m))
            .collect()
    }

    /// Canonical square-free part; `1` for non-zero constants, `0` for zero.
    pub fn square_free_part(&self) -> BiPoly {
        if self.is_zero() {
            return BiPoly::zero();
        }
        self.square_free_factorization()
            .into_iter()
            .fold(BiPoly::one(), |acc, (p, _)| &acc * &p)
            .canonical()
    }

    /// Square-free part of the `y`-primitive part: the polynomial whose
    /// roots over a fixed `x` are exactly the arcs of the curve there.
    /// Vertical line components are dropped.
    pub fn square_free_primitive_part(&self) -> BiPoly {
        let pp = self.primitive_part_y();
        if pp.degree_y() == 0 {
            return if pp.is_zero() { BiPoly::zero() } else { BiPoly::one() };
        }
        let g = pp.gcd(&pp.derivative_y());
        pp.quo(&g).canonical()
    }

    pub fn is_square_free(&self) -> bool {
        !self.is_zero() && self.square_free_factorization().iter().all(|&(_, m)| m == 1)
    }

    /// True iff the gcd with `other` is a constant.
    pub fn is_coprime(&self, other: &BiPoly) -> bool {
        self.gcd(other).total_degree() == 0
    }
}

/// Decompose two curves into a common part and coprime remainders.
///
/// Returns `None` when `f` and `g` are already coprime. Otherwise both
/// vectors start with the (identical) common factor, followed by the
/// remaining non-constant cofactor of the respective input, if any.
pub fn decompose_pair(f: &BiPoly, g: &BiPoly) -> Option<(Vec<BiPoly>, Vec<BiPoly>)> {
    let h = f.gcd(g);
    if h.total_degree() == 0 {
        return None;
    }
    let split = |p: &BiPoly| {
        let mut parts = vec![h.clone()];
        let rest = p.quo(&h);
        if rest.total_degree() > 0 {
            parts.push(rest.canonical());
        }
        parts
    };
    Some((split(f), split(g)))
}
