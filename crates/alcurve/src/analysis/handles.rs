//! Cheap shared handles to curve and curve-pair analyses.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

use super::lines::{PairLineView, StatusLine};
use super::{CurveTopology, PairTopology, TopologyBuilder};
use crate::cache::Identified;
use crate::poly::BiPoly;
use crate::real::AlgebraicReal1;

/// Identity of a registered curve, assigned at insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(pub u64);

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct CurveRep {
    id: CurveId,
    poly: BiPoly,
    builder: Rc<dyn TopologyBuilder>,
    topology: OnceCell<Rc<dyn CurveTopology>>,
}

/// Analysis of one curve: its canonical polynomial plus a topology that is
/// computed on first use. Clones share everything.
#[derive(Clone)]
pub struct CurveAnalysis(Rc<CurveRep>);

impl CurveAnalysis {
    pub(crate) fn new(id: CurveId, poly: BiPoly, builder: Rc<dyn TopologyBuilder>) -> Self {
        Self(Rc::new(CurveRep {
            id,
            poly,
            builder,
            topology: OnceCell::new(),
        }))
    }

    pub fn id(&self) -> CurveId {
        self.0.id
    }

    /// Canonical defining polynomial.
    pub fn polynomial(&self) -> &BiPoly {
        &self.0.poly
    }

    /// Same analysis object (not merely the same polynomial).
    pub fn is_identical(&self, other: &CurveAnalysis) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn topology(&self) -> Rc<dyn CurveTopology> {
        Rc::clone(self.0.topology.get_or_init(|| {
            debug!(curve = %self.0.id, poly = %self.0.poly, "analysing curve");
            self.0.builder.analyse_curve(&self.0.poly)
        }))
    }

    pub fn number_of_status_lines_with_event(&self) -> usize {
        self.topology().number_of_status_lines_with_event()
    }

    pub fn event_x(&self, i: usize) -> AlgebraicReal1 {
        self.topology().event_x(i)
    }

    pub fn status_line_at_event(&self, i: usize) -> Rc<StatusLine> {
        self.topology().status_line_at_event(i)
    }

    pub fn status_line_of_interval(&self, i: usize) -> Rc<StatusLine> {
        self.topology().status_line_of_interval(i)
    }

    pub fn status_line_for_x(&self, x: &AlgebraicReal1) -> Rc<StatusLine> {
        self.topology().status_line_for_x(x)
    }

    pub fn status_line_at_exact_x(&self, x: &AlgebraicReal1) -> Rc<StatusLine> {
        self.topology().status_line_at_exact_x(x)
    }

    pub fn covers_line_at(&self, x: &AlgebraicReal1) -> bool {
        self.topology().covers_line_at(x)
    }
}

impl Identified for CurveAnalysis {
    fn identity(&self) -> u64 {
        self.0.id.0
    }
}

impl fmt::Debug for CurveAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurveAnalysis({}: {})", self.0.id, self.0.poly)
    }
}

struct PairRep {
    first: CurveAnalysis,
    second: CurveAnalysis,
    builder: Rc<dyn TopologyBuilder>,
    topology: OnceCell<Rc<dyn PairTopology>>,
}

/// Analysis of a curve pair. The shared part is stored for the order
/// (lower id, higher id); `swapped` records the caller's order and every
/// orientation-sensitive accessor answers in that order.
#[derive(Clone)]
pub struct CurvePairAnalysis {
    rep: Rc<PairRep>,
    swapped: bool,
}

impl CurvePairAnalysis {
    /// Canonical orientation; `first` must have the lower id.
    pub(crate) fn new(
        first: CurveAnalysis,
        second: CurveAnalysis,
        builder: Rc<dyn TopologyBuilder>,
    ) -> Self {
        debug_assert!(first.id() <= second.id());
        Self {
            rep: Rc::new(PairRep {
                first,
                second,
                builder,
                topology: OnceCell::new(),
            }),
            swapped: false,
        }
    }

    /// The same stored analysis viewed in the given orientation.
    pub(crate) fn oriented(&self, swapped: bool) -> Self {
        Self {
            rep: Rc::clone(&self.rep),
            swapped,
        }
    }

    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// First curve in the caller's order.
    pub fn first(&self) -> &CurveAnalysis {
        if self.swapped {
            &self.rep.second
        } else {
            &self.rep.first
        }
    }

    pub fn second(&self) -> &CurveAnalysis {
        if self.swapped {
            &self.rep.first
        } else {
            &self.rep.second
        }
    }

    /// Both handles refer to one stored analysis.
    pub fn shares_storage_with(&self, other: &CurvePairAnalysis) -> bool {
        Rc::ptr_eq(&self.rep, &other.rep)
    }

    pub fn topology(&self) -> Rc<dyn PairTopology> {
        Rc::clone(self.rep.topology.get_or_init(|| {
            debug!(
                first = %self.rep.first.id(),
                second = %self.rep.second.id(),
                "analysing curve pair"
            );
            self.rep
                .builder
                .analyse_pair(&self.rep.first, &self.rep.second)
        }))
    }

    pub fn number_of_status_lines_with_event(&self) -> usize {
        self.topology().number_of_status_lines_with_event()
    }

    pub fn status_line_at_event(&self, i: usize) -> PairLineView {
        PairLineView::new(self.topology().status_line_at_event(i), self.swapped)
    }

    pub fn status_line_of_interval(&self, i: usize) -> PairLineView {
        PairLineView::new(self.topology().status_line_of_interval(i), self.swapped)
    }

    pub fn status_line_for_x(&self, x: &AlgebraicReal1) -> PairLineView {
        PairLineView::new(self.topology().status_line_for_x(x), self.swapped)
    }
}

impl fmt::Debug for CurvePairAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurvePairAnalysis")
            .field("first", self.first())
            .field("second", self.second())
            .field("swapped", &self.swapped)
            .finish()
    }
}
