//! Points on curves: `(x, supporting curve, arc number)`.
//!
//! Purpose
//! - Represent a point by its exact x-coordinate and the arc of a curve it
//!   lies on; the y-coordinate is implied and only made explicit on demand.
//! - Refine both coordinates in place; refinements are shared by all clones.
//!
//! Why this design
//! - The sign oracle may move a point to a simpler supporting curve (a gcd
//!   factor) once it has proven that the point lies on it. The support is
//!   therefore an interior-mutable cell; the x-coordinate and the exact
//!   y-coordinate never change.
//! - Identity is the shared allocation; `PointId`s key the comparison cache.
//!
//! Code cross-refs: `Kernel::compare_xy`, `Kernel::sign_at`, `StatusLine`.

use nalgebra::Vector2;
use num_rational::BigRational;
use num_traits::Zero;
use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

use super::Kernel;
use crate::analysis::{CurveAnalysis, StatusLine};
use crate::cache::Identified;
use crate::error::KernelError;
use crate::poly::BiPoly;
use crate::real::{AlgebraicReal1, Interval};

/// Identity of a point, assigned by the kernel that made it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

struct PointRep {
    id: PointId,
    x: AlgebraicReal1,
    support: RefCell<(CurveAnalysis, usize)>,
    line: RefCell<Option<Rc<StatusLine>>>,
    y: OnceCell<AlgebraicReal1>,
}

/// A point on a curve. Clones share the representation.
#[derive(Clone)]
pub struct XyCoordinate2(Rc<PointRep>);

impl XyCoordinate2 {
    fn new(id: PointId, x: AlgebraicReal1, curve: CurveAnalysis, arcno: usize) -> Self {
        Self(Rc::new(PointRep {
            id,
            x,
            support: RefCell::new((curve, arcno)),
            line: RefCell::new(None),
            y: OnceCell::new(),
        }))
    }

    pub fn id(&self) -> PointId {
        self.0.id
    }

    pub fn x(&self) -> &AlgebraicReal1 {
        &self.0.x
    }

    /// Current supporting curve.
    pub fn curve(&self) -> CurveAnalysis {
        self.0.support.borrow().0.clone()
    }

    /// Arc of the supporting curve, counted bottom-up over `x`.
    pub fn arcno(&self) -> usize {
        self.0.support.borrow().1
    }

    pub fn is_identical(&self, other: &XyCoordinate2) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Status line of the supporting curve exactly at `x`.
    pub fn status_line(&self) -> Rc<StatusLine> {
        if let Some(line) = self.0.line.borrow().as_ref() {
            return Rc::clone(line);
        }
        let line = self.curve().status_line_at_exact_x(&self.0.x);
        *self.0.line.borrow_mut() = Some(Rc::clone(&line));
        line
    }

    pub fn approximation_x(&self) -> Interval {
        self.0.x.interval()
    }

    pub fn approximation_y(&self) -> Interval {
        match self.0.y.get() {
            Some(y) => y.interval(),
            None => self.status_line().arc_interval(self.arcno()),
        }
    }

    /// One bisection step on x.
    pub fn refine_x(&self) {
        self.0.x.refine();
    }

    /// One bisection step on y.
    pub fn refine_y(&self) {
        match self.0.y.get() {
            Some(y) => y.refine(),
            None => self.status_line().refine_arc(self.arcno()),
        }
    }

    /// Refine x to relative precision `2^-bits`.
    pub fn refine_x_to(&self, bits: u32) {
        self.0.x.refine_to_relative(bits);
    }

    /// Exact y-coordinate.
    ///
    /// The y-values over `x` are roots of `res_x(m(x), f(x, y))` where `m` is
    /// the minimal polynomial of `x`; the right root is the one whose interval
    /// keeps meeting the arc's isolating interval.
    pub fn y(&self) -> AlgebraicReal1 {
        self.0.y.get_or_init(|| self.compute_y()).clone()
    }

    fn compute_y(&self) -> AlgebraicReal1 {
        let arcs = self.curve().polynomial().square_free_primitive_part();
        let elim = match self.0.x.to_rational() {
            Some(r) => arcs.eval_x(&r),
            None if arcs.degree_x() == 0 => arcs.eval_x(&BigRational::zero()),
            None => BiPoly::from_y(&self.0.x.poly()).resultant_y(&arcs.swap_vars()),
        };
        let mut candidates = AlgebraicReal1::roots_of(&elim);
        let line = self.status_line();
        let arcno = self.arcno();
        loop {
            let iv = line.arc_interval(arcno);
            candidates.retain(|c| c.interval().overlaps(&iv));
            match candidates.len() {
                0 => panic!("exact y-coordinate lost: no candidate meets the arc"),
                1 => {
                    let y = candidates.swap_remove(0);
                    trace!(point = self.0.id.0, y = %y, "exact y-coordinate");
                    return y;
                }
                _ => {
                    line.refine_arc(arcno);
                    candidates.iter().for_each(AlgebraicReal1::refine);
                }
            }
        }
    }

    /// Double-precision approximation `(x, y)`.
    pub fn to_f64(&self) -> Vector2<f64> {
        Vector2::new(self.0.x.to_f64(), self.y().to_f64())
    }

    /// Move the point to another curve through it (same `x`, same `y`).
    pub(crate) fn set_support(&self, curve: CurveAnalysis, arcno: usize) {
        *self.0.support.borrow_mut() = (curve, arcno);
        *self.0.line.borrow_mut() = None;
    }
}

impl Identified for XyCoordinate2 {
    fn identity(&self) -> u64 {
        self.0.id.0
    }
}

impl fmt::Debug for XyCoordinate2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (curve, arcno) = &*self.0.support.borrow();
        f.debug_struct("XyCoordinate2")
            .field("id", &self.0.id.0)
            .field("x", &self.0.x)
            .field("curve", &curve.id())
            .field("arcno", arcno)
            .finish()
    }
}

impl Kernel {
    /// The point on arc `arcno` of `ca` over `x`.
    pub fn construct_point(
        &self,
        x: AlgebraicReal1,
        ca: &CurveAnalysis,
        arcno: usize,
    ) -> Result<XyCoordinate2, KernelError> {
        let line = ca.status_line_at_exact_x(&x);
        let arcs = line.number_of_events();
        if arcno >= arcs {
            return Err(KernelError::ArcOutOfRange { arcno, arcs });
        }
        let p = self.point_unchecked(x, ca, arcno);
        *p.0.line.borrow_mut() = Some(line);
        Ok(p)
    }

    pub(crate) fn point_unchecked(
        &self,
        x: AlgebraicReal1,
        ca: &CurveAnalysis,
        arcno: usize,
    ) -> XyCoordinate2 {
        let id = PointId(self.next_point_id.get());
        self.next_point_id.set(id.0 + 1);
        XyCoordinate2::new(id, x, ca.clone(), arcno)
    }

    pub fn lower_boundary_x(&self, p: &XyCoordinate2) -> BigRational {
        p.approximation_x().lo
    }

    pub fn upper_boundary_x(&self, p: &XyCoordinate2) -> BigRational {
        p.approximation_x().hi
    }

    pub fn lower_boundary_y(&self, p: &XyCoordinate2) -> BigRational {
        p.approximation_y().lo
    }

    pub fn upper_boundary_y(&self, p: &XyCoordinate2) -> BigRational {
        p.approximation_y().hi
    }

    /// A rational strictly between the x-coordinates; they must differ.
    pub fn boundary_between_x(&self, p: &XyCoordinate2, q: &XyCoordinate2) -> BigRational {
        AlgebraicReal1::separating_rational(p.x(), q.x())
    }

    /// A rational strictly between the y-coordinates; they must differ.
    pub fn boundary_between_y(&self, p: &XyCoordinate2, q: &XyCoordinate2) -> BigRational {
        AlgebraicReal1::separating_rational(&p.y(), &q.y())
    }
}
