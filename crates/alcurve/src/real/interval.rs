//! Signs and closed rational intervals.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Exact sign of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn of(r: &BigRational) -> Sign {
        if r.is_zero() {
            Sign::Zero
        } else if r.is_negative() {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    pub fn from_ordering(o: Ordering) -> Sign {
        match o {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }

    pub fn to_ordering(self) -> Ordering {
        match self {
            Sign::Negative => Ordering::Less,
            Sign::Zero => Ordering::Equal,
            Sign::Positive => Ordering::Greater,
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }
}

impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sign::Negative => "NEGATIVE",
            Sign::Zero => "ZERO",
            Sign::Positive => "POSITIVE",
        };
        f.write_str(s)
    }
}

/// Closed interval `[lo, hi]` with exact endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub lo: BigRational,
    pub hi: BigRational,
}

impl Interval {
    pub fn new(lo: BigRational, hi: BigRational) -> Self {
        debug_assert!(lo <= hi, "interval endpoints out of order");
        Self { lo, hi }
    }

    pub fn point(r: BigRational) -> Self {
        Self {
            lo: r.clone(),
            hi: r,
        }
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    pub fn width(&self) -> BigRational {
        &self.hi - &self.lo
    }

    pub fn mid(&self) -> BigRational {
        (&self.lo + &self.hi) / BigRational::from_integer(BigInt::from(2))
    }

    pub fn contains(&self, r: &BigRational) -> bool {
        &self.lo <= r && r <= &self.hi
    }

    /// Closed intervals share at least one point.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Sign common to every point of the interval, if there is one.
    pub fn sign(&self) -> Option<Sign> {
        if self.lo.is_positive() {
            Some(Sign::Positive)
        } else if self.hi.is_negative() {
            Some(Sign::Negative)
        } else if self.lo.is_zero() && self.hi.is_zero() {
            Some(Sign::Zero)
        } else {
            None
        }
    }

    /// Largest absolute value over the interval.
    pub fn magnitude(&self) -> BigRational {
        let a = self.lo.abs();
        let b = self.hi.abs();
        if a > b {
            a
        } else {
            b
        }
    }

    /// Smallest absolute value over the interval (0 if it contains 0).
    pub fn mignitude(&self) -> BigRational {
        match self.sign() {
            Some(Sign::Positive) => self.lo.clone(),
            Some(Sign::Negative) => -self.hi.clone(),
            _ => BigRational::zero(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        rat_to_f64(&self.mid())
    }
}

/// Nearest-ish `f64` of a rational; huge numerators and denominators are
/// shifted down together before conversion.
pub fn rat_to_f64(r: &BigRational) -> f64 {
    let (n, d) = (r.numer(), r.denom());
    let bits = n.bits().max(d.bits());
    let shift = bits.saturating_sub(1000) as usize;
    let (n, d) = if shift > 0 {
        (n >> shift, d >> shift)
    } else {
        (n.clone(), d.clone())
    };
    match (n.to_f64(), d.to_f64()) {
        (Some(a), Some(b)) if b != 0.0 => a / b,
        _ => f64::NAN,
    }
}

impl Add for &Interval {
    type Output = Interval;
    fn add(self, rhs: &Interval) -> Interval {
        Interval {
            lo: &self.lo + &rhs.lo,
            hi: &self.hi + &rhs.hi,
        }
    }
}

impl Sub for &Interval {
    type Output = Interval;
    fn sub(self, rhs: &Interval) -> Interval {
        Interval {
            lo: &self.lo - &rhs.hi,
            hi: &self.hi - &rhs.lo,
        }
    }
}

impl Mul for &Interval {
    type Output = Interval;
    fn mul(self, rhs: &Interval) -> Interval {
        if self.is_point() && rhs.is_point() {
            return Interval::point(&self.lo * &rhs.lo);
        }
        let c = [
            &self.lo * &rhs.lo,
            &self.lo * &rhs.hi,
            &self.hi * &rhs.lo,
            &self.hi * &rhs.hi,
        ];
        let mut lo = c[0].clone();
        let mut hi = c[0].clone();
        for v in &c[1..] {
            if *v < lo {
                lo = v.clone();
            }
            if *v > hi {
                hi = v.clone();
            }
        }
        Interval { lo, hi }
    }
}

impl Neg for &Interval {
    type Output = Interval;
    fn neg(self) -> Interval {
        Interval {
            lo: -self.hi.clone(),
            hi: -self.lo.clone(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
