//! Exact real numbers used by the kernel.
//!
//! Purpose
//! - `Sign` and `Interval`: exact rational interval arithmetic for inclusion
//!   functions and certified signs.
//! - `AlgebraicReal1`: event and point x-coordinates.
//! - `Fiber`: the ordered arcs of a curve over an exact x-coordinate.
//!
//! Why this design
//! - All decisions are exact; floating point only appears in `to_f64`
//!   conveniences for reporting.

mod algebraic;
mod fiber;
mod interval;
mod isolate;

pub use algebraic::AlgebraicReal1;
pub use fiber::Fiber;
pub use interval::{rat_to_f64, Interval, Sign};
