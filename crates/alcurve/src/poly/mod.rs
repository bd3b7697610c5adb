//! Exact polynomial provider (Q[t] and Q[x][y]).
//!
//! Purpose
//! - Supply the polynomial operations the kernel treats as a collaborator:
//!   canonicalization, gcd, exact division, derivatives, square-free
//!   factorization, resultants, interval evaluation and parsing.
//! - Everything is exact over `BigRational`; curves are stored with integer
//!   coefficients after canonicalization.
//!
//! Why this design
//! - Dense representations. Curves handled by the kernel have small total
//!   degree, so dense coefficient vectors keep the code short and the derived
//!   `Eq`/`Hash`/`Ord` impls double as cache keys.
//! - `BiPoly` is a polynomial in `y` with coefficients in `Q[x]`; this is the
//!   orientation every analysis step (fibers over `x`, resultants in `y`) uses.
//!
//! Code cross-refs: `UPoly`, `BiPoly`, `decompose_pair`, `crate::real::Interval`.

mod bipoly;
mod factor;
mod parse;
mod resultant;
mod upoly;

pub use bipoly::BiPoly;
pub use factor::decompose_pair;
pub use upoly::{rat, sign_variations, UPoly};

pub(crate) use upoly::count_variations;

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// Shared pretty-printer: terms `(coefficient, x-exponent, y-exponent)`,
/// highest first, zero terms skipped.
pub(crate) fn write_terms(
    f: &mut fmt::Formatter<'_>,
    terms: impl Iterator<Item = (BigRational, u32, u32)>,
) -> fmt::Result {
    let mut first = true;
    for (c, ex, ey) in terms {
        if c.is_zero() {
            continue;
        }
        let neg = c.is_negative();
        let a = c.abs();
        if first {
            if neg {
                write!(f, "-")?;
            }
        } else {
            write!(f, " {} ", if neg { "-" } else { "+" })?;
        }
        first = false;
        let has_var = ex > 0 || ey > 0;
        if !a.is_one() || !has_var {
            if a.is_integer() {
                write!(f, "{}", a.numer())?;
            } else {
                write!(f, "({}/{})", a.numer(), a.denom())?;
            }
            if has_var {
                write!(f, "*")?;
            }
        }
        let mut wrote = false;
        for (name, e) in [("x", ex), ("y", ey)] {
            if e == 0 {
                continue;
            }
            if wrote {
                write!(f, "*")?;
            }
            write!(f, "{name}")?;
            if e > 1 {
                write!(f, "^{e}")?;
            }
            wrote = true;
        }
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}
