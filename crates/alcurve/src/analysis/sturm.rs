//! Reference topology builder based on resultants and Sturm sequences.
//!
//! Events of a curve are the real roots of `content · lc_y · res_y(f, f_y)`
//! for the square-free primitive part `f`; events of a pair are the roots of
//! the resultant of both arc polynomials together with both curves' events.
//! Between consecutive events the arcs do not cross or escape, so one
//! rational sample per interval represents the whole interval.

use num_rational::BigRational;
use num_traits::Zero;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;
use tracing::{debug, warn};

use super::handles::CurveAnalysis;
use super::lines::{PairStatusLine, StatusLine};
use super::{CurveTopology, PairTopology, TopologyBuilder};
use crate::poly::{rat, BiPoly, UPoly};
use crate::real::{AlgebraicReal1, Fiber, Sign};

/// Builds `SturmCurve` / `SturmPair` analyses.
#[derive(Clone, Copy, Debug, Default)]
pub struct SturmBuilder;

impl TopologyBuilder for SturmBuilder {
    fn analyse_curve(&self, f: &BiPoly) -> Rc<dyn CurveTopology> {
        Rc::new(SturmCurve::new(f))
    }

    fn analyse_pair(&self, f: &CurveAnalysis, g: &CurveAnalysis) -> Rc<dyn PairTopology> {
        Rc::new(SturmPair::new(f, g))
    }
}

type LineSlots<L> = RefCell<Vec<Option<Rc<L>>>>;

/// Sorted events, interval samples and lazily built lines.
#[derive(Debug)]
struct LineTable<L> {
    events: Vec<AlgebraicReal1>,
    samples: Vec<BigRational>,
    at_event: LineSlots<L>,
    of_interval: LineSlots<L>,
}

impl<L> LineTable<L> {
    fn new(events: Vec<AlgebraicReal1>) -> Self {
        let samples = sample_points(&events);
        let n = events.len();
        Self {
            events,
            samples,
            at_event: RefCell::new(vec![None; n]),
            of_interval: RefCell::new(vec![None; n + 1]),
        }
    }

    /// `Ok(i)` if `x` is event `i`, `Err(k)` if it lies in interval `k`.
    fn locate(&self, x: &AlgebraicReal1) -> Result<usize, usize> {
        self.events.binary_search_by(|e| e.compare(x))
    }

    fn event_line(&self, i: usize, build: impl FnOnce(&AlgebraicReal1) -> L) -> Rc<L> {
        Self::cached(&self.at_event, i, || build(&self.events[i]))
    }

    fn interval_line(&self, i: usize, build: impl FnOnce(&AlgebraicReal1) -> L) -> Rc<L> {
        Self::cached(&self.of_interval, i, || {
            build(&AlgebraicReal1::from_rational(self.samples[i].clone()))
        })
    }

    fn cached(slots: &LineSlots<L>, i: usize, build: impl FnOnce() -> L) -> Rc<L> {
        if let Some(line) = &slots.borrow()[i] {
            return Rc::clone(line);
        }
        let line = Rc::new(build());
        Rc::clone(slots.borrow_mut()[i].get_or_insert(line))
    }
}

/// One rational strictly inside every interval cut out by `events`.
fn sample_points(events: &[AlgebraicReal1]) -> Vec<BigRational> {
    let (Some(first), Some(last)) = (events.first(), events.last()) else {
        return vec![BigRational::zero()];
    };
    let mut out = Vec::with_capacity(events.len() + 1);
    out.push(first.lower().floor() - rat(1));
    for w in events.windows(2) {
        out.push(AlgebraicReal1::separating_rational(&w[0], &w[1]));
    }
    out.push(last.upper().ceil() + rat(1));
    out
}

fn sorted_distinct(mut xs: Vec<AlgebraicReal1>) -> Vec<AlgebraicReal1> {
    xs.sort_by(|a, b| a.compare(b));
    xs.dedup_by(|a, b| a.compare(b) == Ordering::Equal);
    xs
}

/// Single-curve analysis.
#[derive(Debug)]
pub struct SturmCurve {
    content: UPoly,
    arcs: BiPoly,
    lines: LineTable<StatusLine>,
}

impl SturmCurve {
    pub fn new(f: &BiPoly) -> Self {
        let content = f.content_y().square_free();
        let arcs = f.square_free_primitive_part();
        let mut critical = content.clone();
        if arcs.degree_y() > 0 {
            let disc = arcs.resultant_y(&arcs.derivative_y());
            critical = &(&critical * &arcs.lc_y()) * &disc;
        }
        let events = AlgebraicReal1::roots_of(&critical);
        debug!(poly = %f, events = events.len(), "curve events isolated");
        Self {
            content,
            arcs,
            lines: LineTable::new(events),
        }
    }

    /// The polynomial whose y-roots over x are the arcs.
    pub fn arc_polynomial(&self) -> &BiPoly {
        &self.arcs
    }

    fn covers(&self, x: &AlgebraicReal1) -> bool {
        self.content.is_zero() || x.sign_of(&self.content) == Sign::Zero
    }

    fn make_line(&self, x: &AlgebraicReal1, index: usize, is_event: bool) -> StatusLine {
        let covers = self.covers(x);
        StatusLine::new(x.clone(), index, is_event, covers, Fiber::new(x, &self.arcs))
    }
}

impl CurveTopology for SturmCurve {
    fn number_of_status_lines_with_event(&self) -> usize {
        self.lines.events.len()
    }

    fn event_x(&self, i: usize) -> AlgebraicReal1 {
        self.lines.events[i].clone()
    }

    fn status_line_at_event(&self, i: usize) -> Rc<StatusLine> {
        self.lines.event_line(i, |x| self.make_line(x, i, true))
    }

    fn status_line_of_interval(&self, i: usize) -> Rc<StatusLine> {
        self.lines.interval_line(i, |x| self.make_line(x, i, false))
    }

    fn status_line_for_x(&self, x: &AlgebraicReal1) -> Rc<StatusLine> {
        match self.lines.locate(x) {
            Ok(i) => self.status_line_at_event(i),
            Err(k) => self.status_line_of_interval(k),
        }
    }

    fn status_line_at_exact_x(&self, x: &AlgebraicReal1) -> Rc<StatusLine> {
        match self.lines.locate(x) {
            Ok(i) => self.status_line_at_event(i),
            Err(k) => Rc::new(self.make_line(x, k, false)),
        }
    }

    fn covers_line_at(&self, x: &AlgebraicReal1) -> bool {
        self.covers(x)
    }
}

/// Order of `x` as a root of `p` (0 if it is not one).
fn root_order(p: &UPoly, x: &AlgebraicReal1) -> usize {
    let mut d = p.clone();
    let mut k = 0;
    while !d.is_zero() && x.sign_of(&d) == Sign::Zero {
        k += 1;
        d = d.derivative();
    }
    k
}

/// Both arc polynomials after `x -> x + s·y`, with their resultant.
///
/// A shear is usable at a point when both leading y-coefficients are
/// constant (no roots escape to infinity) and exactly one complex common
/// point lies over the image x. The order of the image as a root of the
/// sheared resultant is then the intersection multiplicity at the point.
#[derive(Debug)]
struct Shear {
    s: BigRational,
    f: BiPoly,
    g: BiPoly,
    resultant: UPoly,
    roots: Vec<AlgebraicReal1>,
}

impl Shear {
    fn new(fa: &BiPoly, ga: &BiPoly, s: BigRational) -> Option<Self> {
        let (f, g) = (fa.shear_x(&s), ga.shear_x(&s));
        if !f.lc_y().is_constant() || !g.lc_y().is_constant() {
            return None;
        }
        let resultant = f.resultant_y(&g);
        let roots = AlgebraicReal1::roots_of(&resultant);
        Some(Self {
            s,
            f,
            g,
            resultant,
            roots,
        })
    }

    /// Multiplicities of the common roots of `common` over `x`, or `None`
    /// if this shear does not separate them.
    fn multiplicities(&self, x: &AlgebraicReal1, common: &Fiber) -> Option<Vec<usize>> {
        let mut out = Vec::with_capacity(common.number_of_roots());
        for c in 0..common.number_of_roots() {
            let t = self.image(x, common, c);
            if !self.single_point_over(&t) {
                return None;
            }
            out.push(root_order(&self.resultant, &t));
        }
        Some(out)
    }

    /// The root of the sheared resultant at `x - s·y_c`.
    fn image(&self, x: &AlgebraicReal1, common: &Fiber, c: usize) -> AlgebraicReal1 {
        loop {
            let (ix, iy) = (x.interval(), common.root_interval(c));
            let lo = &ix.lo - &self.s * &iy.hi;
            let hi = &ix.hi - &self.s * &iy.lo;
            let mut inside = self.roots.iter().filter(|t| {
                t.compare_rational(&lo) != Ordering::Less
                    && t.compare_rational(&hi) != Ordering::Greater
            });
            if let (Some(t), None) = (inside.next(), inside.next()) {
                return t.clone();
            }
            x.refine();
            common.refine_root(c);
        }
    }

    /// Exactly one distinct complex y-root is shared over `t`.
    fn single_point_over(&self, t: &AlgebraicReal1) -> bool {
        let common = Fiber::new(t, &self.f).common(&Fiber::new(t, &self.g));
        let p = common.polynomial();
        if p.degree_y() <= 1 {
            return p.degree_y() == 1;
        }
        let repeated = common.common(&Fiber::new(t, &p.derivative_y()));
        p.degree_y() - repeated.polynomial().degree_y() == 1
    }
}

/// Curve-pair analysis.
#[derive(Debug)]
pub struct SturmPair {
    f: CurveAnalysis,
    g: CurveAnalysis,
    resultant: UPoly,
    /// Arc polynomials, unless they share a component.
    arcs: Option<(BiPoly, BiPoly)>,
    shears: RefCell<Vec<Option<Rc<Shear>>>>,
    lines: LineTable<PairStatusLine>,
}

impl SturmPair {
    pub fn new(f: &CurveAnalysis, g: &CurveAnalysis) -> Self {
        let fa = f.polynomial().square_free_primitive_part();
        let ga = g.polynomial().square_free_primitive_part();
        let h = fa.gcd(&ga);
        let (resultant, arcs) = if h.degree_y() == 0 {
            (fa.resultant_y(&ga), Some((fa, ga)))
        } else {
            warn!(first = %f.id(), second = %g.id(), common = %h, "curve pair shares a component");
            let r = &fa.quo(&h).resultant_y(&ga) * &fa.resultant_y(&ga.quo(&h));
            (r, None)
        };
        let mut xs = AlgebraicReal1::roots_of(&resultant);
        for c in [f, g] {
            xs.extend((0..c.number_of_status_lines_with_event()).map(|i| c.event_x(i)));
        }
        let events = sorted_distinct(xs);
        debug!(first = %f.id(), second = %g.id(), events = events.len(), "pair events isolated");
        Self {
            f: f.clone(),
            g: g.clone(),
            resultant,
            arcs,
            shears: RefCell::new(Vec::new()),
            lines: LineTable::new(events),
        }
    }

    /// Intersection multiplicity of each root of `common` over `x`.
    ///
    /// A single common root over `x` where some leading coefficient
    /// survives takes the order of `x` in the resultant. Anything else is
    /// resolved in sheared coordinates, trying `s = 1, 2, ...` until one
    /// separates the points.
    fn multiplicities_at(&self, x: &AlgebraicReal1, common: &Fiber) -> Vec<usize> {
        let n = common.number_of_roots();
        let Some((fa, ga)) = &self.arcs else {
            return vec![1; n];
        };
        let proper = x.sign_of(&fa.lc_y()) != Sign::Zero || x.sign_of(&ga.lc_y()) != Sign::Zero;
        if common.polynomial().degree_y() == 1 && proper {
            return vec![root_order(&self.resultant, x).max(1)];
        }
        let mut k = 1;
        loop {
            if let Some(shear) = self.shear(fa, ga, k) {
                if let Some(m) = shear.multiplicities(x, common) {
                    debug!(shear = k, x = %x, "multiplicities from sheared resultant");
                    return m;
                }
            }
            k += 1;
        }
    }

    fn shear(&self, fa: &BiPoly, ga: &BiPoly, k: usize) -> Option<Rc<Shear>> {
        if let Some(slot) = self.shears.borrow().get(k - 1) {
            return slot.clone();
        }
        let shear = Shear::new(fa, ga, rat(k as i64)).map(Rc::new);
        let mut shears = self.shears.borrow_mut();
        if shears.len() < k {
            shears.resize(k, None);
        }
        shears[k - 1] = shear.clone();
        shear
    }

    fn make_line(&self, x: &AlgebraicReal1, index: usize, is_event: bool) -> PairStatusLine {
        let lf = self.f.status_line_at_exact_x(x);
        let lg = self.g.status_line_at_exact_x(x);
        let (ff, gf) = (lf.fiber(), lg.fiber());
        if ff.vanishes_identically() || gf.vanishes_identically() {
            return PairStatusLine::new(x.clone(), index, is_event, Vec::new(), Vec::new());
        }
        let (nf, ng) = (ff.number_of_roots(), gf.number_of_roots());
        let common = ff.common(gf);
        let mult = if common.number_of_roots() > 0 {
            self.multiplicities_at(x, &common)
        } else {
            Vec::new()
        };
        let mut f_to_g = vec![None; nf];
        let mut g_matched = vec![false; ng];
        for (c, &m) in mult.iter().enumerate() {
            let i = ff.root_index_of(&common, c);
            let j = gf.root_index_of(&common, c);
            f_to_g[i] = Some((j, m));
            g_matched[j] = true;
        }

        let mut events = Vec::with_capacity(nf + ng);
        let mut mults = Vec::with_capacity(nf + ng);
        let (mut i, mut j) = (0, 0);
        while i < nf || j < ng {
            let step = if i == nf {
                Ordering::Greater
            } else if j == ng {
                Ordering::Less
            } else {
                match f_to_g[i] {
                    Some((m, _)) if m == j => Ordering::Equal,
                    // f_i coincides with a higher g-root, so g_j lies below it
                    Some(_) => Ordering::Greater,
                    None if g_matched[j] => Ordering::Less,
                    None => ff.compare_roots(i, gf, j),
                }
            };
            match step {
                Ordering::Less => {
                    events.push((Some(i), None));
                    mults.push(0);
                    i += 1;
                }
                Ordering::Greater => {
                    events.push((None, Some(j)));
                    mults.push(0);
                    j += 1;
                }
                Ordering::Equal => {
                    events.push((Some(i), Some(j)));
                    mults.push(f_to_g[i].map_or(1, |(_, m)| m));
                    i += 1;
                    j += 1;
                }
            }
        }
        PairStatusLine::new(x.clone(), index, is_event, events, mults)
    }
}

impl PairTopology for SturmPair {
    fn number_of_status_lines_with_event(&self) -> usize {
        self.lines.events.len()
    }

    fn status_line_at_event(&self, i: usize) -> Rc<PairStatusLine> {
        self.lines.event_line(i, |x| self.make_line(x, i, true))
    }

    fn status_line_of_interval(&self, i: usize) -> Rc<PairStatusLine> {
        self.lines.interval_line(i, |x| self.make_line(x, i, false))
    }

    fn status_line_for_x(&self, x: &AlgebraicReal1) -> Rc<PairStatusLine> {
        match self.lines.locate(x) {
            Ok(i) => self.status_line_at_event(i),
            Err(k) => self.status_line_of_interval(k),
        }
    }
}
