//! Curve and curve-pair topology (collaborator contract + reference builder).
//!
//! Purpose
//! - Define what the kernel needs from a topology analysis: event x-values,
//!   status lines per event and per interval between events, lookup of the
//!   line for an arbitrary algebraic x, and for pairs the bottom-up interleaving
//!   of both curves' arcs with intersection multiplicities.
//! - Ship `SturmBuilder`, an exact reference implementation behind the traits.
//!
//! Why this design
//! - The kernel only talks to `dyn CurveTopology` / `dyn PairTopology`, so a
//!   different analysis (e.g. one that handles non-generic positions more
//!   cleverly) can be plugged in through `TopologyBuilder` without touching
//!   the caches or the sign oracle.
//! - Lines are `Rc`-shared and built lazily; asking for the same line twice
//!   returns the same object, so refinements of arc intervals accumulate.
//!
//! Code cross-refs: `CurveAnalysis`, `CurvePairAnalysis`, `crate::real::Fiber`.

mod handles;
mod lines;
mod sturm;

pub use handles::{CurveAnalysis, CurveId, CurvePairAnalysis};
pub use lines::{CurveSide, PairLineView, PairStatusLine, StatusLine};
pub use sturm::{SturmBuilder, SturmCurve, SturmPair};

use std::fmt;
use std::rc::Rc;

use crate::poly::BiPoly;
use crate::real::AlgebraicReal1;

/// Topology of one curve.
pub trait CurveTopology: fmt::Debug {
    fn number_of_status_lines_with_event(&self) -> usize;

    /// x-coordinate of event `i` (ascending in `i`).
    fn event_x(&self, i: usize) -> AlgebraicReal1;

    fn status_line_at_event(&self, i: usize) -> Rc<StatusLine>;

    /// Line over the open interval left of event `i` (`i == n` is the last one).
    fn status_line_of_interval(&self, i: usize) -> Rc<StatusLine>;

    /// Event line if `x` is an event, otherwise the line of the interval
    /// containing `x` (sampled elsewhere in the interval; arc numbering is
    /// the same everywhere in it).
    fn status_line_for_x(&self, x: &AlgebraicReal1) -> Rc<StatusLine>;

    /// Like `status_line_for_x`, but a non-event line is taken exactly at `x`.
    fn status_line_at_exact_x(&self, x: &AlgebraicReal1) -> Rc<StatusLine>;

    /// Whether the vertical line at `x` is a component of the curve, without
    /// building the line.
    fn covers_line_at(&self, x: &AlgebraicReal1) -> bool;
}

/// Topology of a curve pair in stored orientation.
pub trait PairTopology: fmt::Debug {
    fn number_of_status_lines_with_event(&self) -> usize;
    fn status_line_at_event(&self, i: usize) -> Rc<PairStatusLine>;
    fn status_line_of_interval(&self, i: usize) -> Rc<PairStatusLine>;
    fn status_line_for_x(&self, x: &AlgebraicReal1) -> Rc<PairStatusLine>;
}

/// Factory for topology analyses.
pub trait TopologyBuilder: fmt::Debug {
    fn analyse_curve(&self, f: &BiPoly) -> Rc<dyn CurveTopology>;
    fn analyse_pair(&self, f: &CurveAnalysis, g: &CurveAnalysis) -> Rc<dyn PairTopology>;
}

#[cfg(test)]
mod tests;
