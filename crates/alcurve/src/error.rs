//! Recoverable failures of kernel operations.
//!
//! Precondition violations (non-square-free input to `solve`, curves sharing
//! a component, ...) are documented on the operations and not checked here;
//! internal inconsistencies are assertions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// Malformed polynomial text; `pos` is a byte offset into the input.
    #[error("parse error at byte {pos}: {reason}")]
    Parse { pos: usize, reason: String },

    #[error("arc {arcno} out of range: the status line has {arcs} arcs")]
    ArcOutOfRange { arcno: usize, arcs: usize },

    #[error("capacity of the {cache} cache must be positive")]
    InvalidCapacity { cache: &'static str },

    /// The zero polynomial was passed where a proper curve is required.
    #[error("operation is undefined for the zero polynomial")]
    ZeroCurve,
}
