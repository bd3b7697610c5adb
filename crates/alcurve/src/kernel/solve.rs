//! Intersection points of two curves and critical points of one.

use tracing::debug;

use super::{Kernel, XyCoordinate2};
use crate::analysis::{CurveAnalysis, CurveSide};
use crate::error::KernelError;
use crate::real::Sign;

impl Kernel {
    /// Common points of two curves with their intersection multiplicities,
    /// sorted by x and then bottom-up.
    ///
    /// The curves should be square-free and coprime; otherwise the result
    /// covers only the isolated intersections. Points are supported by the
    /// curve of lower total degree (the second one on ties) unless only the
    /// other one has arcs there.
    pub fn solve(
        &self,
        ca1: &CurveAnalysis,
        ca2: &CurveAnalysis,
    ) -> Result<Vec<(XyCoordinate2, usize)>, KernelError> {
        if ca1.polynomial().is_zero() || ca2.polynomial().is_zero() {
            return Err(KernelError::ZeroCurve);
        }
        let primary = if ca1.polynomial().total_degree() < ca2.polynomial().total_degree() {
            CurveSide::First
        } else {
            CurveSide::Second
        };
        let out = self.intersections(ca1, ca2, primary);
        debug!(first = %ca1.id(), second = %ca2.id(), points = out.len(), "solved");
        Ok(out)
    }

    /// Points of `ca` where `∂f/∂y` vanishes too (vertical tangents and
    /// singular points).
    pub fn x_critical_points(&self, ca: &CurveAnalysis) -> Vec<XyCoordinate2> {
        match self.derivative_y(ca) {
            Some(d) => self.points_of(ca, &d),
            None => Vec::new(),
        }
    }

    /// Points of `ca` where `∂f/∂x` vanishes too (horizontal tangents and
    /// singular points).
    pub fn y_critical_points(&self, ca: &CurveAnalysis) -> Vec<XyCoordinate2> {
        match self.derivative_x(ca) {
            Some(d) => self.points_of(ca, &d),
            None => Vec::new(),
        }
    }

    fn points_of(&self, ca: &CurveAnalysis, other: &CurveAnalysis) -> Vec<XyCoordinate2> {
        self.intersections(ca, other, CurveSide::First)
            .into_iter()
            .map(|(p, _)| p)
            .collect()
    }

    /// Walk the pair's event lines bottom-up. Besides arc crossings, a
    /// vertical line of one curve meets every arc of the other over it.
    fn intersections(
        &self,
        f: &CurveAnalysis,
        g: &CurveAnalysis,
        primary: CurveSide,
    ) -> Vec<(XyCoordinate2, usize)> {
        let pair = self.construct_curve_pair(f, g);
        let mut out = Vec::new();
        for i in 0..pair.number_of_status_lines_with_event() {
            let line = pair.status_line_at_event(i);
            let x = line.x();
            let f_covers = f.covers_line_at(x);
            let g_covers = g.covers_line_at(x);
            let one_vertical = f_covers != g_covers;
            if !line.is_intersection() && !one_vertical {
                continue;
            }
            for j in 0..line.number_of_events() {
                let (a, b) = line.curves_at_event(j);
                let (support, arcno) = match (a, b) {
                    (Some(a), Some(b)) => match primary {
                        CurveSide::First => (f, a),
                        CurveSide::Second => (g, b),
                    },
                    (None, Some(b)) if one_vertical && f_covers => (g, b),
                    (Some(a), None) if one_vertical && g_covers => (f, a),
                    _ => continue,
                };
                let mut mult = line.multiplicity_of_intersection(j);
                if one_vertical {
                    let crossing = if f_covers { (g, b) } else { (f, a) };
                    if let (c, Some(arc)) = crossing {
                        let q = self.point_unchecked(x.clone(), c, arc);
                        mult += self.vertical_multiplicity(c, &q);
                    }
                }
                out.push((self.point_unchecked(x.clone(), support, arcno), mult));
            }
        }
        out
    }

    /// Intersection multiplicity of a vertical line with `c` at `q`: the
    /// order of `q.y` as a root of `c(q.x, y)`.
    fn vertical_multiplicity(&self, c: &CurveAnalysis, q: &XyCoordinate2) -> usize {
        let mut d = c.polynomial().derivative_y();
        let mut k = 1;
        while d.total_degree() > 0 && self.sign_at(&self.construct_curve(&d), q) == Sign::Zero {
            k += 1;
            d = d.derivative_y();
        }
        k
    }
}
