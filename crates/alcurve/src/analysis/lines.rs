//! Status lines: the vertical slice of a curve or a curve pair at one x.

use std::rc::Rc;

use crate::real::{AlgebraicReal1, Fiber, Interval};

/// Which curve of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveSide {
    First,
    Second,
}

impl CurveSide {
    pub fn flip(self) -> CurveSide {
        match self {
            CurveSide::First => CurveSide::Second,
            CurveSide::Second => CurveSide::First,
        }
    }
}

/// Status line of a single curve at `x`. Arcs are numbered bottom-up by the
/// order of their y-coordinates over `x`.
#[derive(Debug)]
pub struct StatusLine {
    x: AlgebraicReal1,
    index: usize,
    is_event: bool,
    covers_line: bool,
    fiber: Fiber,
}

impl StatusLine {
    pub fn new(
        x: AlgebraicReal1,
        index: usize,
        is_event: bool,
        covers_line: bool,
        fiber: Fiber,
    ) -> Self {
        Self {
            x,
            index,
            is_event,
            covers_line,
            fiber,
        }
    }

    pub fn x(&self) -> &AlgebraicReal1 {
        &self.x
    }

    /// Event index for event lines, interval index otherwise.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_event(&self) -> bool {
        self.is_event
    }

    /// The vertical line through `x` is a component of the curve.
    pub fn covers_line(&self) -> bool {
        self.covers_line
    }

    /// Number of arcs (distinct y-values) over `x`.
    pub fn number_of_events(&self) -> usize {
        self.fiber.number_of_roots()
    }

    pub fn arc_interval(&self, arcno: usize) -> Interval {
        self.fiber.root_interval(arcno)
    }

    pub fn refine_arc(&self, arcno: usize) {
        self.fiber.refine_root(arcno);
    }

    pub fn fiber(&self) -> &Fiber {
        &self.fiber
    }
}

/// Status line of a curve pair at `x`, stored for the canonical orientation.
///
/// Entry `j` lists, bottom-up, which arc of each curve passes through the
/// j-th point over `x` (`None` if that curve does not).
#[derive(Clone, Debug)]
pub struct PairStatusLine {
    x: AlgebraicReal1,
    index: usize,
    is_event: bool,
    events: Vec<(Option<usize>, Option<usize>)>,
    multiplicities: Vec<usize>,
}

impl PairStatusLine {
    /// `multiplicities[j]` is the intersection multiplicity of entry `j`
    /// (0 where only one curve is present).
    pub fn new(
        x: AlgebraicReal1,
        index: usize,
        is_event: bool,
        events: Vec<(Option<usize>, Option<usize>)>,
        multiplicities: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(events.len(), multiplicities.len());
        Self {
            x,
            index,
            is_event,
            events,
            multiplicities,
        }
    }

    pub fn x(&self) -> &AlgebraicReal1 {
        &self.x
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_event(&self) -> bool {
        self.is_event
    }

    pub fn is_intersection(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, (Some(_), Some(_))))
    }

    pub fn number_of_events(&self) -> usize {
        self.events.len()
    }

    pub fn curves_at_event(&self, j: usize) -> (Option<usize>, Option<usize>) {
        self.events[j]
    }

    pub fn multiplicity_of_intersection(&self, j: usize) -> usize {
        self.multiplicities[j]
    }

    /// Position of arc `arcno` of the given curve among the events.
    pub fn event_of_curve(&self, arcno: usize, side: CurveSide) -> Option<usize> {
        self.events.iter().position(|&(a, b)| match side {
            CurveSide::First => a == Some(arcno),
            CurveSide::Second => b == Some(arcno),
        })
    }
}

/// A pair status line seen in the caller's argument order.
#[derive(Clone, Debug)]
pub struct PairLineView {
    line: Rc<PairStatusLine>,
    swapped: bool,
}

impl PairLineView {
    pub(crate) fn new(line: Rc<PairStatusLine>, swapped: bool) -> Self {
        Self { line, swapped }
    }

    pub fn x(&self) -> &AlgebraicReal1 {
        self.line.x()
    }

    pub fn index(&self) -> usize {
        self.line.index()
    }

    pub fn is_event(&self) -> bool {
        self.line.is_event()
    }

    pub fn is_intersection(&self) -> bool {
        self.line.is_intersection()
    }

    pub fn number_of_events(&self) -> usize {
        self.line.number_of_events()
    }

    pub fn curves_at_event(&self, j: usize) -> (Option<usize>, Option<usize>) {
        let (a, b) = self.line.curves_at_event(j);
        if self.swapped {
            (b, a)
        } else {
            (a, b)
        }
    }

    pub fn multiplicity_of_intersection(&self, j: usize) -> usize {
        self.line.multiplicity_of_intersection(j)
    }

    pub fn event_of_curve(&self, arcno: usize, side: CurveSide) -> Option<usize> {
        let side = if self.swapped { side.flip() } else { side };
        self.line.event_of_curve(arcno, side)
    }

    /// The line in stored orientation.
    pub fn stored(&self) -> &PairStatusLine {
        &self.line
    }
}
