//! Exact sign of a curve's polynomial at a point.
//!
//! Algebraic certificates decide the zero case; every non-zero sign is found
//! by interval evaluation over the point's isolating box, refining the wider
//! side until the enclosure excludes zero. The refinement loop terminates
//! because a non-zero value has a neighbourhood free of zeros and both
//! isolating intervals shrink to the point.

use tracing::{debug, trace};

use super::{Kernel, XyCoordinate2};
use crate::analysis::{CurveAnalysis, CurveSide};
use crate::real::Sign;

impl Kernel {
    /// Sign of `f`'s polynomial at `r`. May move `r` to a simpler supporting
    /// curve through the same point.
    pub fn sign_at(&self, f: &CurveAnalysis, r: &XyCoordinate2) -> Sign {
        if r.curve().is_identical(f) || self.vanishes_at(f, r) {
            return Sign::Zero;
        }
        let poly = f.polynomial();
        let mut steps = 0usize;
        loop {
            let (ix, iy) = (r.approximation_x(), r.approximation_y());
            if let Some(s) = poly.eval_box(&ix, &iy).sign() {
                trace!(curve = %f.id(), steps, sign = %s, "sign by refinement");
                return s;
            }
            if ix.width() >= iy.width() {
                r.refine_x();
            } else {
                r.refine_y();
            }
            steps += 1;
        }
    }

    /// Certified test for `f(r) = 0`.
    fn vanishes_at(&self, f: &CurveAnalysis, r: &XyCoordinate2) -> bool {
        if f.polynomial().is_zero() {
            return true;
        }
        if f.covers_line_at(r.x()) {
            return true;
        }
        let support = r.curve();
        let h = self.gcd_of(f.polynomial(), support.polynomial());
        if h.total_degree() > 0 {
            if &h == support.polynomial() {
                return true;
            }
            let common = self.construct_curve(&h);
            let rest = self.construct_curve(&support.polynomial().quo(&h));
            let pair = self.construct_curve_pair(&common, &rest);
            let line = pair.status_line_for_x(r.x());
            match line.curves_at_event(r.arcno()) {
                (Some(arcno), _) => {
                    debug!(curve = %f.id(), support = %common.id(), "point lies on the common factor");
                    r.set_support(common, arcno);
                    return true;
                }
                (None, Some(arcno)) => {
                    debug!(curve = %f.id(), support = %rest.id(), "point moved to the coprime cofactor");
                    r.set_support(rest, arcno);
                }
                (None, None) => unreachable!("pair status line entry names no curve"),
            }
        }
        let pair = self.construct_curve_pair(f, &r.curve());
        let line = pair.status_line_for_x(r.x());
        if !(line.is_event() && line.is_intersection()) {
            return false;
        }
        match line.event_of_curve(r.arcno(), CurveSide::Second) {
            Some(j) => matches!(line.curves_at_event(j), (Some(_), Some(_))),
            None => false,
        }
    }
}
