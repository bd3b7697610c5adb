//! Memoizing exact kernel for real plane algebraic curves.
//!
//! A `Kernel` deduplicates curve and curve-pair analyses, memoizes gcds and
//! point comparisons, and answers exact questions about points on curves:
//! the sign of a polynomial at a point, intersection points with
//! multiplicities, and decompositions into common and coprime parts.
//!
//! Layers (bottom-up)
//! - `poly`: exact polynomials over Q (univariate and in `Q[x][y]`).
//! - `real`: intervals, real algebraic numbers, fibers over algebraic x.
//! - `cache`: canonicalizing LRU caches.
//! - `analysis`: the topology contract and the reference Sturm builder.
//! - `kernel`: registries, comparison, sign oracle, solve and decompose.
//!
//! API Policy
//! - The crate is internal to this workspace; there is no stable public API.
//!   Prefer `api` or `prelude` imports in callers.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod error;
pub mod gen;
pub mod kernel;
pub mod poly;
pub mod real;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::KernelError;
pub use kernel::{Kernel, KernelCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::analysis::{CurveAnalysis, CurvePairAnalysis, CurveSide};
    pub use crate::error::KernelError;
    pub use crate::kernel::{Decomposition, Kernel, KernelCfg, XyCoordinate2};
    pub use crate::poly::{rat, BiPoly, UPoly};
    pub use crate::real::{AlgebraicReal1, Interval, Sign};
    pub use nalgebra::Vector2 as Vec2;
}
