//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a flat convenience surface for the CLI,
//!   benches and experiments. Breaking changes are allowed.

// Kernel context and results
pub use crate::kernel::{
    Decomposition, Kernel, KernelCfg, KernelStats, PointId, XyCoordinate2,
};
// Curve and pair analyses
pub use crate::analysis::{
    CurveAnalysis, CurveId, CurvePairAnalysis, CurveSide, CurveTopology, PairLineView,
    PairStatusLine, PairTopology, StatusLine, SturmBuilder, TopologyBuilder,
};
// Caches
pub use crate::cache::{CacheStats, CanonCache, Canonicalizer, Identified, SymmetricPairCache};
// Exact numbers and polynomials
pub use crate::poly::{decompose_pair, rat, BiPoly, UPoly};
pub use crate::real::{rat_to_f64, AlgebraicReal1, Fiber, Interval, Sign};
// Random curves
pub use crate::gen::{random_circle, random_line, random_poly, PolyGenCfg, ReplayToken};
pub use crate::error::KernelError;
