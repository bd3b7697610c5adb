//! Real algebraic numbers by square-free polynomial and isolating interval.
//!
//! Purpose
//! - Exact x-coordinates of events and points: comparison, sign of a rational
//!   polynomial at the number, refinement to a requested precision.
//!
//! Why this design
//! - The representation is shared (`Rc<RefCell<..>>`): refining one handle
//!   tightens every clone, which is what the sign oracle's bisection loop and
//!   the status-line lookups rely on.
//! - Invariant: the defining polynomial is monic and square-free with exactly
//!   one root in `[lo, hi]`. Either `lo == hi` (the number is that rational),
//!   or both endpoints are non-roots, hence of opposite sign.
//!
//! Code cross-refs: `crate::real::isolate`, `Fiber`.

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use super::interval::{Interval, Sign};
use super::isolate::{isolate, SturmCounter};
use crate::poly::UPoly;

#[derive(Debug)]
struct RealRep {
    poly: UPoly,
    iv: Interval,
}

/// Shared handle to a real algebraic number.
#[derive(Clone)]
pub struct AlgebraicReal1 {
    rep: Rc<RefCell<RealRep>>,
}

impl AlgebraicReal1 {
    pub fn from_rational(r: BigRational) -> Self {
        Self::from_parts(UPoly::linear_root(&r), Interval::point(r))
    }

    pub fn from_int(n: i64) -> Self {
        Self::from_rational(crate::poly::rat(n))
    }

    /// Assumes the representation invariant; degree-1 polynomials collapse
    /// to their rational root.
    pub(crate) fn from_parts(poly: UPoly, iv: Interval) -> Self {
        let poly = poly.monic();
        let iv = if poly.degree() == 1 {
            Interval::point(-poly.coeff(0))
        } else {
            iv
        };
        Self {
            rep: Rc::new(RefCell::new(RealRep { poly, iv })),
        }
    }

    /// All real roots of `p`, ascending, without multiplicity. Empty for
    /// constants (including the zero polynomial).
    pub fn roots_of(p: &UPoly) -> Vec<AlgebraicReal1> {
        let sq = p.square_free();
        if sq.is_constant() {
            return Vec::new();
        }
        let seq = sq.sturm_sequence();
        let b = sq.root_bound();
        let mut counter = SturmCounter { seq: &seq };
        isolate(&mut counter, -b.clone(), b)
            .into_iter()
            .map(|iv| Self::from_parts(sq.clone(), iv))
            .collect()
    }

    /// Monic square-free defining polynomial.
    pub fn poly(&self) -> UPoly {
        self.rep.borrow().poly.clone()
    }

    /// Current isolating interval.
    pub fn interval(&self) -> Interval {
        self.rep.borrow().iv.clone()
    }

    pub fn lower(&self) -> BigRational {
        self.rep.borrow().iv.lo.clone()
    }

    pub fn upper(&self) -> BigRational {
        self.rep.borrow().iv.hi.clone()
    }

    /// The value, if it is known to be rational.
    pub fn to_rational(&self) -> Option<BigRational> {
        let rep = self.rep.borrow();
        rep.iv.is_point().then(|| rep.iv.lo.clone())
    }

    pub fn is_rational_known(&self) -> bool {
        self.rep.borrow().iv.is_point()
    }

    /// Same shared representation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.rep, &other.rep)
    }

    /// One bisection step.
    pub fn refine(&self) {
        let mut rep = self.rep.borrow_mut();
        if rep.iv.is_point() {
            return;
        }
        let m = rep.iv.mid();
        let sm = rep.poly.sign_at(&m);
        if sm == Sign::Zero {
            rep.iv = Interval::point(m);
        } else if sm == rep.poly.sign_at(&rep.iv.lo) {
            rep.iv.lo = m;
        } else {
            rep.iv.hi = m;
        }
    }

    /// Refine until the interval is no wider than `eps`.
    pub fn refine_to_width(&self, eps: &BigRational) {
        while &self.interval().width() > eps {
            self.refine();
        }
    }

    /// Refine until `width ≤ |value| · 2^-bits`, or the value is known exactly.
    pub fn refine_to_relative(&self, bits: u32) {
        let scale = BigRational::from_integer(num_bigint::BigInt::one() << bits as usize);
        loop {
            let iv = self.interval();
            if iv.is_point() {
                return;
            }
            if iv.lo.is_negative() && iv.hi.is_positive() {
                if self.rep.borrow().poly.eval(&BigRational::zero()).is_zero() {
                    self.rep.borrow_mut().iv = Interval::point(BigRational::zero());
                    return;
                }
            } else if iv.width() * &scale <= iv.mignitude() {
                return;
            }
            self.refine();
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.refine_to_relative(53);
        self.interval().to_f64()
    }

    /// Exact sign of `c` at this number.
    ///
    /// A non-trivial `g = gcd(poly, c)` vanishes here iff it changes sign over
    /// the isolating interval. Otherwise the value is non-zero and interval
    /// evaluation on a refined interval eventually certifies its sign.
    pub fn sign_of(&self, c: &UPoly) -> Sign {
        if c.is_zero() {
            return Sign::Zero;
        }
        if let Some(r) = self.to_rational() {
            return c.sign_at(&r);
        }
        let poly = self.poly();
        let c = if c.degree() >= poly.degree() {
            c.rem(&poly)
        } else {
            c.clone()
        };
        if c.is_zero() {
            return Sign::Zero;
        }
        let g = poly.gcd(&c);
        if !g.is_constant() {
            let iv = self.interval();
            if g.sign_at(&iv.lo) != g.sign_at(&iv.hi) {
                return Sign::Zero;
            }
        }
        loop {
            let iv = self.interval();
            if iv.is_point() {
                return c.sign_at(&iv.lo);
            }
            match c.eval_interval(&iv).sign() {
                Some(s) if s != Sign::Zero => return s,
                _ => self.refine(),
            }
        }
    }

    /// Exact comparison with a rational.
    pub fn compare_rational(&self, r: &BigRational) -> Ordering {
        loop {
            let iv = self.interval();
            if iv.is_point() {
                return iv.lo.cmp(r);
            }
            if r <= &iv.lo {
                return Ordering::Greater;
            }
            if r >= &iv.hi {
                return Ordering::Less;
            }
            if self.rep.borrow().poly.eval(r).is_zero() {
                self.rep.borrow_mut().iv = Interval::point(r.clone());
                return Ordering::Equal;
            }
            self.refine();
        }
    }

    /// Exact comparison.
    pub fn compare(&self, other: &AlgebraicReal1) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        if let Some(r) = other.to_rational() {
            return self.compare_rational(&r);
        }
        if let Some(r) = self.to_rational() {
            return other.compare_rational(&r).reverse();
        }
        let (a, b) = (self.interval(), other.interval());
        if a.hi <= b.lo {
            return Ordering::Less;
        }
        if b.hi <= a.lo {
            return Ordering::Greater;
        }
        if self.sign_of(&other.poly()) == Sign::Zero && self.lies_inside(&other.interval()) {
            return Ordering::Equal;
        }
        // distinct: refine both until the intervals separate
        loop {
            let (a, b) = (self.interval(), other.interval());
            if a.hi <= b.lo {
                return Ordering::Less;
            }
            if b.hi <= a.lo {
                return Ordering::Greater;
            }
            self.refine();
            other.refine();
        }
    }

    /// Whether this number lies in the open interval `(b.lo, b.hi)`.
    /// Requires that it is not an endpoint of `b`.
    fn lies_inside(&self, b: &Interval) -> bool {
        loop {
            let a = self.interval();
            if a.lo >= b.lo && a.hi <= b.hi && !(a.is_point() && (a.lo == b.lo || a.lo == b.hi))
            {
                return true;
            }
            if a.hi <= b.lo || a.lo >= b.hi {
                return false;
            }
            self.refine();
        }
    }

    /// A rational strictly between `a` and `b`; they must differ.
    pub fn separating_rational(a: &AlgebraicReal1, b: &AlgebraicReal1) -> BigRational {
        let (lo, hi) = match a.compare(b) {
            Ordering::Less => (a, b),
            Ordering::Greater => (b, a),
            Ordering::Equal => panic!("separating_rational on equal numbers"),
        };
        loop {
            let (x, y) = (lo.interval(), hi.interval());
            if x.hi < y.lo {
                return (&x.hi + &y.lo) / BigRational::from_integer(2.into());
            }
            if x.hi == y.lo && !x.is_point() && !y.is_point() {
                return x.hi;
            }
            lo.refine();
            hi.refine();
        }
    }
}

impl PartialEq for AlgebraicReal1 {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for AlgebraicReal1 {}

impl fmt::Debug for AlgebraicReal1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep = self.rep.borrow();
        write!(f, "AlgebraicReal1(root of {} in {})", rep.poly, rep.iv)
    }
}

impl fmt::Display for AlgebraicReal1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let iv = self.rep.borrow().iv.clone();
        if iv.is_point() {
            write!(f, "{}", iv.lo)
        } else {
            write!(f, "~{:.12}", iv.to_f64())
        }
    }
}

impl From<BigRational> for AlgebraicReal1 {
    fn from(r: BigRational) -> Self {
        Self::from_rational(r)
    }
}
