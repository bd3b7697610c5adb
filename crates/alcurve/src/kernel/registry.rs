//! Curve and curve-pair registries, gcd cache and polynomial predicates.

use std::rc::Rc;
use tracing::debug;

use super::Kernel;
use crate::analysis::{CurveAnalysis, CurveId, CurvePairAnalysis};
use crate::cache::{CanonCache, SymmetricPairCache};
use crate::error::KernelError;
use crate::poly::BiPoly;

impl Kernel {
    /// The analysis of the curve `f = 0`. Scalar multiples of one polynomial
    /// share one analysis (while it stays cached).
    pub fn construct_curve(&self, f: &BiPoly) -> CurveAnalysis {
        let (ca, inserted) = CanonCache::get_or_create_in(&self.curves, f.clone(), |key| {
            let id = CurveId(self.next_curve_id.get());
            CurveAnalysis::new(id, key.clone(), Rc::clone(&self.builder))
        });
        if inserted {
            self.next_curve_id.set(ca.id().0 + 1);
            debug!(curve = %ca.id(), poly = %ca.polynomial(), "registered curve");
        }
        ca
    }

    /// Parse and register.
    pub fn construct_curve_from_str(&self, s: &str) -> Result<CurveAnalysis, KernelError> {
        let f: BiPoly = s.parse()?;
        Ok(self.construct_curve(&f))
    }

    /// The pair analysis of two curves, viewed in argument order. The stored
    /// analysis is shared by `(ca1, ca2)` and `(ca2, ca1)`.
    pub fn construct_curve_pair(
        &self,
        ca1: &CurveAnalysis,
        ca2: &CurveAnalysis,
    ) -> CurvePairAnalysis {
        let (pair, swapped) =
            SymmetricPairCache::get_or_create_symmetric_in(&self.pairs, ca1, ca2, |lo, hi| {
                debug!(first = %lo.id(), second = %hi.id(), "registering curve pair");
                CurvePairAnalysis::new(lo.clone(), hi.clone(), Rc::clone(&self.builder))
            });
        pair.oriented(swapped)
    }

    /// Canonical gcd of two polynomials, memoized for the unordered pair.
    pub fn gcd_of(&self, p: &BiPoly, q: &BiPoly) -> BiPoly {
        let (g, _) = CanonCache::get_or_create_in(&self.gcds, (p.clone(), q.clone()), |(a, b)| {
            let g = a.gcd(b).canonical();
            assert!(
                !g.is_zero() || (a.is_zero() && b.is_zero()),
                "gcd of non-zero polynomials vanished"
            );
            g
        });
        g
    }

    /// The curves meet in finitely many points.
    pub fn is_coprime(&self, ca1: &CurveAnalysis, ca2: &CurveAnalysis) -> bool {
        self.gcd_of(ca1.polynomial(), ca2.polynomial()).total_degree() == 0
    }

    pub fn is_square_free(&self, f: &BiPoly) -> bool {
        f.is_square_free()
    }

    /// Curve of `∂f/∂x`; `None` if the derivative is the zero polynomial.
    pub fn derivative_x(&self, ca: &CurveAnalysis) -> Option<CurveAnalysis> {
        let d = ca.polynomial().derivative_x();
        (!d.is_zero()).then(|| self.construct_curve(&d))
    }

    /// Curve of `∂f/∂y`; `None` if the derivative is the zero polynomial.
    pub fn derivative_y(&self, ca: &CurveAnalysis) -> Option<CurveAnalysis> {
        let d = ca.polynomial().derivative_y();
        (!d.is_zero()).then(|| self.construct_curve(&d))
    }
}
