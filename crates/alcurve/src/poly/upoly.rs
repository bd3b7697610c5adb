//! Dense univariate polynomials over Q.
//!
//! Coefficients are stored low-to-high without trailing zeros, so the zero
//! polynomial is the empty vector and structural equality is polynomial
//! equality. All operations are exact (`BigRational`).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::real::{Interval, Sign};

/// Shorthand for an integer-valued rational.
#[inline]
pub fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// Univariate polynomial `Σ coeffs[i] · t^i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UPoly {
    coeffs: Vec<BigRational>,
}

impl UPoly {
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(c: BigRational) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// The identity polynomial `t`.
    pub fn t() -> Self {
        Self::from_coeffs(vec![BigRational::zero(), BigRational::one()])
    }

    /// `t - r`.
    pub fn linear_root(r: &BigRational) -> Self {
        Self::from_coeffs(vec![-r.clone(), BigRational::one()])
    }

    pub fn from_coeffs(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn from_ints(coeffs: &[i64]) -> Self {
        Self::from_coeffs(coeffs.iter().map(|&c| rat(c)).collect())
    }

    #[inline]
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// True for constants, including zero.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    /// Degree; the zero polynomial reports 0 (check `is_zero` first).
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeff(&self, i: usize) -> BigRational {
        self.coeffs.get(i).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Leading coefficient (zero for the zero polynomial).
    pub fn lc(&self) -> BigRational {
        self.coeffs.last().cloned().unwrap_or_else(BigRational::zero)
    }

    pub fn eval(&self, t: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * t + c;
        }
        acc
    }

    #[inline]
    pub fn sign_at(&self, t: &BigRational) -> Sign {
        Sign::of(&self.eval(t))
    }

    /// Horner evaluation in exact interval arithmetic (an inclusion function
    /// that converges as the interval shrinks).
    pub fn eval_interval(&self, iv: &Interval) -> Interval {
        let mut acc = Interval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = &(&acc * iv) + &Interval::point(c.clone());
        }
        acc
    }

    pub fn derivative(&self) -> Self {
        Self::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * rat(i as i64))
                .collect(),
        )
    }

    pub fn scale(&self, k: &BigRational) -> Self {
        if k.is_zero() {
            return Self::zero();
        }
        Self {
            coeffs: self.coeffs.iter().map(|c| c * k).collect(),
        }
    }

    /// Multiply by `t^k`.
    pub fn shift(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![BigRational::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Monic associate; zero stays zero.
    pub fn monic(&self) -> Self {
        match self.coeffs.last() {
            None => Self::zero(),
            Some(lc) if lc.is_one() => self.clone(),
            Some(lc) => self.scale(&lc.recip()),
        }
    }

    pub fn pow(&self, k: u32) -> Self {
        let mut acc = Self::one();
        for _ in 0..k {
            acc = &acc * self;
        }
        acc
    }

    /// Euclidean division. Panics on a zero divisor.
    pub fn div_rem(&self, d: &UPoly) -> (UPoly, UPoly) {
        assert!(!d.is_zero(), "division by the zero polynomial");
        if self.coeffs.len() < d.coeffs.len() {
            return (Self::zero(), self.clone());
        }
        let dl = d.lc().recip();
        let dn = d.degree();
        let mut r = self.coeffs.clone();
        let mut q = vec![BigRational::zero(); r.len() - dn];
        for k in (0..q.len()).rev() {
            let c = &r[k + dn] * &dl;
            if !c.is_zero() {
                for (i, dc) in d.coeffs.iter().enumerate() {
                    r[k + i] = &r[k + i] - &c * dc;
                }
            }
            q[k] = c;
        }
        r.truncate(dn);
        (Self::from_coeffs(q), Self::from_coeffs(r))
    }

    pub fn rem(&self, d: &UPoly) -> UPoly {
        self.div_rem(d).1
    }

    /// Quotient of a division known to be exact.
    pub fn exact_div(&self, d: &UPoly) -> UPoly {
        let (q, r) = self.div_rem(d);
        debug_assert!(r.is_zero(), "inexact polynomial division");
        q
    }

    /// Monic gcd; `gcd(0, 0) = 0`.
    pub fn gcd(&self, other: &UPoly) -> UPoly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Extended Euclid: returns `(g, s, t)` with `s·self + t·other = g`, `g` monic.
    pub fn ext_gcd(&self, other: &UPoly) -> (UPoly, UPoly, UPoly) {
        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(), Self::zero());
        let (mut t0, mut t1) = (Self::zero(), Self::one());
        while !r1.is_zero() {
            let (q, r) = r0.div_rem(&r1);
            r0 = std::mem::replace(&mut r1, r);
            let s = &s0 - &(&q * &s1);
            s0 = std::mem::replace(&mut s1, s);
            let t = &t0 - &(&q * &t1);
            t0 = std::mem::replace(&mut t1, t);
        }
        if r0.is_zero() {
            return (r0, s0, t0);
        }
        let k = r0.lc().recip();
        (r0.scale(&k), s0.scale(&k), t0.scale(&k))
    }

    /// Monic square-free part (product of the distinct irreducible factors).
    pub fn square_free(&self) -> UPoly {
        if self.is_constant() {
            return self.monic();
        }
        let g = self.gcd(&self.derivative());
        self.exact_div(&g).monic()
    }

    /// Yun's algorithm: monic square-free factors with their multiplicity,
    /// one factor per multiplicity, constants omitted.
    pub fn square_free_factorization(&self) -> Vec<(UPoly, usize)> {
        let mut out = Vec::new();
        if self.is_constant() {
            return out;
        }
        let f = self.monic();
        let fp = f.derivative();
        let a0 = f.gcd(&fp);
        let mut b = f.exact_div(&a0);
        let c = fp.exact_div(&a0);
        let mut d = &c - &b.derivative();
        let mut i = 1;
        while !b.is_constant() {
            let a = b.gcd(&d);
            b = b.exact_div(&a);
            let c = d.exact_div(&a);
            d = &c - &b.derivative();
            if !a.is_constant() {
                out.push((a, i));
            }
            i += 1;
        }
        out
    }

    /// Sturm sequence `p, p', -rem(p_{i-1}, p_i), ...`.
    pub fn sturm_sequence(&self) -> Vec<UPoly> {
        let mut seq = vec![self.clone()];
        if self.is_constant() {
            return seq;
        }
        seq.push(self.derivative());
        loop {
            let n = seq.len();
            let r = seq[n - 2].rem(&seq[n - 1]);
            if r.is_zero() {
                break;
            }
            seq.push(-r);
        }
        seq
    }

    /// Cauchy bound: every real root `r` satisfies `|r| < bound`.
    pub fn root_bound(&self) -> BigRational {
        let lc = self.lc().abs();
        let mut m = BigRational::zero();
        for c in &self.coeffs[..self.degree()] {
            let q = c.abs() / &lc;
            if q > m {
                m = q;
            }
        }
        m + rat(1)
    }
}

/// Number of sign changes of a polynomial sequence at `t` (zeros skipped).
pub fn sign_variations(seq: &[UPoly], t: &BigRational) -> usize {
    count_variations(seq.iter().map(|p| p.sign_at(t)))
}

pub(crate) fn count_variations(signs: impl Iterator<Item = Sign>) -> usize {
    let mut last = Sign::Zero;
    let mut n = 0;
    for s in signs {
        if s == Sign::Zero {
            continue;
        }
        if last != Sign::Zero && s != last {
            n += 1;
        }
        last = s;
    }
    n
}

impl Add for &UPoly {
    type Output = UPoly;
    fn add(self, rhs: &UPoly) -> UPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        UPoly::from_coeffs((0..n).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub for &UPoly {
    type Output = UPoly;
    fn sub(self, rhs: &UPoly) -> UPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        UPoly::from_coeffs((0..n).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Mul for &UPoly {
    type Output = UPoly;
    fn mul(self, rhs: &UPoly) -> UPoly {
        if self.is_zero() || rhs.is_zero() {
            return UPoly::zero();
        }
        let mut out = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] = &out[i + j] + a * b;
            }
        }
        UPoly::from_coeffs(out)
    }
}

impl Neg for UPoly {
    type Output = UPoly;
    fn neg(self) -> UPoly {
        UPoly {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}

impl fmt::Display for UPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_terms(
            f,
            self.coeffs
                .iter()
                .enumerate()
                .rev()
                .map(|(i, c)| (c.clone(), i as u32, 0u32)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_and_gcd() {
        // (t-1)(t+2) and (t-1)(t-3)
        let a = UPoly::from_ints(&[-2, 1, 1]);
        let b = UPoly::from_ints(&[3, -4, 1]);
        assert_eq!(a.gcd(&b), UPoly::from_ints(&[-1, 1]));
        let (q, r) = a.div_rem(&UPoly::from_ints(&[-1, 1]));
        assert!(r.is_zero());
        assert_eq!(q, UPoly::from_ints(&[2, 1]));
    }

    #[test]
    fn ext_gcd_gives_inverse_modulo() {
        let m = UPoly::from_ints(&[-2, 0, 1]); // t^2 - 2
        let c = UPoly::from_ints(&[1, 1]); // t + 1
        let (g, s, _t) = c.ext_gcd(&m);
        assert_eq!(g, UPoly::one());
        assert_eq!((&s * &c).rem(&m), UPoly::one());
    }

    #[test]
    fn yun_factorization() {
        // (t-1)^2 (t+1)
        let f = &(&UPoly::from_ints(&[-1, 1]) * &UPoly::from_ints(&[-1, 1]))
            * &UPoly::from_ints(&[1, 1]);
        let sqf = f.square_free_factorization();
        assert_eq!(
            sqf,
            vec![
                (UPoly::from_ints(&[1, 1]), 1),
                (UPoly::from_ints(&[-1, 1]), 2)
            ]
        );
        assert_eq!(f.square_free(), UPoly::from_ints(&[-1, 0, 1]));
    }

    #[test]
    fn sturm_counts_roots() {
        let p = UPoly::from_ints(&[0, -1, 0, 1]); // t^3 - t
        let seq = p.sturm_sequence();
        let b = p.root_bound();
        assert_eq!(sign_variations(&seq, &-b.clone()) - sign_variations(&seq, &b), 3);
    }

    #[test]
    fn interval_eval_encloses_value() {
        let p = UPoly::from_ints(&[-2, 0, 1]);
        let iv = Interval::new(rat(1), rat(2));
        let v = p.eval_interval(&iv);
        assert!(v.lo <= rat(-1) && v.hi >= rat(2));
    }
}
