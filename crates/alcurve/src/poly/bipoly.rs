//! Bivariate polynomials as `Σ_j c_j(x) · y^j`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::upoly::{rat, UPoly};
use crate::real::Interval;

/// Dense polynomial in `y` over `Q[x]`; no trailing zero coefficients.
///
/// The derived `Ord` is an arbitrary but fixed total order, used to put
/// unordered pairs of polynomials into a canonical order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiPoly {
    coeffs: Vec<UPoly>,
}

impl BiPoly {
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Self::from_x(UPoly::one())
    }

    pub fn constant(c: BigRational) -> Self {
        Self::from_x(UPoly::constant(c))
    }

    pub fn x() -> Self {
        Self::from_x(UPoly::t())
    }

    pub fn y() -> Self {
        Self::from_coeffs_y(vec![UPoly::zero(), UPoly::one()])
    }

    /// Polynomial in `x` only.
    pub fn from_x(p: UPoly) -> Self {
        Self::from_coeffs_y(vec![p])
    }

    /// Polynomial in `y` only (`p` read as a polynomial in `y`).
    pub fn from_y(p: &UPoly) -> Self {
        Self::from_coeffs_y(p.coeffs().iter().cloned().map(UPoly::constant).collect())
    }

    pub fn from_coeffs_y(mut coeffs: Vec<UPoly>) -> Self {
        while coeffs.last().is_some_and(UPoly::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Build from `(coefficient, x-exponent, y-exponent)` terms; repeated
    /// monomials are summed.
    pub fn from_terms(terms: &[(i64, u32, u32)]) -> Self {
        let mut acc = Self::zero();
        for &(c, ex, ey) in terms {
            let cx = UPoly::constant(rat(c)).shift(ex as usize);
            acc = &acc + &Self::from_x(cx).shift_y(ey as usize);
        }
        acc
    }

    #[inline]
    pub fn coeffs_y(&self) -> &[UPoly] {
        &self.coeffs
    }

    pub fn coeff_y(&self, j: usize) -> UPoly {
        self.coeffs.get(j).cloned().unwrap_or_else(UPoly::zero)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    #[inline]
    pub fn degree_y(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn degree_x(&self) -> usize {
        self.coeffs.iter().map(UPoly::degree).max().unwrap_or(0)
    }

    /// Total degree; 0 for constants and for the zero polynomial.
    pub fn total_degree(&self) -> usize {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(j, c)| c.degree() + j)
            .max()
            .unwrap_or(0)
    }

    /// Leading coefficient with respect to `y`.
    pub fn lc_y(&self) -> UPoly {
        self.coeffs.last().cloned().unwrap_or_else(UPoly::zero)
    }

    pub fn scale(&self, k: &BigRational) -> Self {
        Self::from_coeffs_y(self.coeffs.iter().map(|c| c.scale(k)).collect())
    }

    /// Multiply by a polynomial in `x`.
    pub fn mul_x(&self, p: &UPoly) -> Self {
        Self::from_coeffs_y(self.coeffs.iter().map(|c| c * p).collect())
    }

    /// Multiply by `y^k`.
    pub fn shift_y(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![UPoly::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Apply `f` to every coefficient in `Q[x]`.
    pub fn map_coeffs(&self, f: impl FnMut(&UPoly) -> UPoly) -> Self {
        Self::from_coeffs_y(self.coeffs.iter().map(f).collect())
    }

    pub fn pow(&self, k: u32) -> Self {
        let mut acc = Self::one();
        for _ in 0..k {
            acc = &acc * self;
        }
        acc
    }

    /// `f(x0, y)` as a polynomial in `y`.
    pub fn eval_x(&self, x0: &BigRational) -> UPoly {
        UPoly::from_coeffs(self.coeffs.iter().map(|c| c.eval(x0)).collect())
    }

    /// `f(x, y0)` as a polynomial in `x`.
    pub fn eval_y(&self, y0: &BigRational) -> UPoly {
        let mut acc = UPoly::zero();
        for c in self.coeffs.iter().rev() {
            acc = &acc.scale(y0) + c;
        }
        acc
    }

    pub fn eval(&self, x0: &BigRational, y0: &BigRational) -> BigRational {
        self.eval_x(x0).eval(y0)
    }

    /// Interval enclosure of `f` over the box `ix × iy`.
    pub fn eval_box(&self, ix: &Interval, iy: &Interval) -> Interval {
        let mut acc = Interval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = &(&acc * iy) + &c.eval_interval(ix);
        }
        acc
    }

    pub fn derivative_x(&self) -> Self {
        self.map_coeffs(UPoly::derivative)
    }

    pub fn derivative_y(&self) -> Self {
        Self::from_coeffs_y(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(j, c)| c.scale(&rat(j as i64)))
                .collect(),
        )
    }

    /// Exchange the roles of `x` and `y`.
    pub fn swap_vars(&self) -> Self {
        let mut out = vec![vec![BigRational::zero(); self.coeffs.len()]; self.degree_x() + 1];
        for (j, c) in self.coeffs.iter().enumerate() {
            for (i, a) in c.coeffs().iter().enumerate() {
                out[i][j] = a.clone();
            }
        }
        Self::from_coeffs_y(out.into_iter().map(UPoly::from_coeffs).collect())
    }

    /// `f(x + s·y, y)`. A point `(a, b)` of `f` becomes `(a - s·b, b)`.
    pub fn shear_x(&self, s: &BigRational) -> Self {
        let lin = &Self::x() + &Self::y().scale(s);
        let mut acc = Self::zero();
        for (j, c) in self.coeffs.iter().enumerate() {
            let mut cj = Self::zero();
            for a in c.coeffs().iter().rev() {
                cj = &(&cj * &lin) + &Self::constant(a.clone());
            }
            acc = &acc + &cj.shift_y(j);
        }
        acc
    }

    /// Monic gcd in `Q[x]` of the `y`-coefficients (zero for zero).
    pub fn content_y(&self) -> UPoly {
        self.coeffs
            .iter()
            .fold(UPoly::zero(), |g, c| if g.is_constant() && !g.is_zero() { g } else { g.gcd(c) })
    }

    /// `self / content_y(self)`.
    pub fn primitive_part_y(&self) -> Self {
        let c = self.content_y();
        if c.is_zero() || c.is_one() {
            return self.clone();
        }
        self.map_coeffs(|a| a.exact_div(&c))
    }

    /// Pseudo-remainder in `y`: some `lc_y(d)^k · self` reduced modulo `d`.
    pub(crate) fn pseudo_rem_y(&self, d: &BiPoly) -> BiPoly {
        let dl = d.lc_y();
        let dn = d.degree_y();
        let mut r = self.clone();
        while !r.is_zero() && r.degree_y() >= dn {
            let k = r.degree_y() - dn;
            let top = r.degree_y();
            let rl = r.lc_y();
            let next = &r.mul_x(&dl) - &d.mul_x(&rl).shift_y(k);
            let mut coeffs = next.coeffs;
            coeffs.truncate(top);
            r = Self::from_coeffs_y(coeffs);
        }
        r
    }

    /// Exact quotient in `Q[x][y]`, `None` if `d` does not divide `self`.
    pub fn div_exact(&self, d: &BiPoly) -> Option<BiPoly> {
        assert!(!d.is_zero(), "division by the zero polynomial");
        let dl = d.lc_y();
        let dn = d.degree_y();
        let mut r = self.clone();
        let mut q = vec![UPoly::zero(); self.coeffs.len().saturating_sub(dn).max(1)];
        while !r.is_zero() && r.degree_y() >= dn {
            let k = r.degree_y() - dn;
            let top = r.degree_y();
            let (cq, crem) = r.lc_y().div_rem(&dl);
            if !crem.is_zero() {
                return None;
            }
            let next = &r - &d.mul_x(&cq).shift_y(k);
            q[k] = cq;
            let mut coeffs = next.coeffs;
            coeffs.truncate(top);
            r = Self::from_coeffs_y(coeffs);
        }
        r.is_zero().then(|| Self::from_coeffs_y(q))
    }

    /// Quotient of a division that must be exact.
    pub(crate) fn quo(&self, d: &BiPoly) -> BiPoly {
        match self.div_exact(d) {
            Some(q) => q,
            None => panic!("inexact bivariate division: ({self}) / ({d})"),
        }
    }

    /// Gcd over `Q[x][y]`: gcd of the contents times the primitive
    /// pseudo-remainder gcd of the primitive parts; result canonical.
    pub fn gcd(&self, other: &BiPoly) -> BiPoly {
        if self.is_zero() {
            return other.canonical();
        }
        if other.is_zero() {
            return self.canonical();
        }
        let c = self.content_y().gcd(&other.content_y());
        let mut a = self.primitive_part_y();
        let mut b = other.primitive_part_y();
        if a.degree_y() < b.degree_y() {
            std::mem::swap(&mut a, &mut b);
        }
        while !b.is_zero() {
            let r = a.pseudo_rem_y(&b);
            a = b;
            b = r.primitive_part_y();
        }
        a.primitive_part_y().mul_x(&c).canonical()
    }

    /// Integer coefficients with gcd 1 and a positive leading coefficient
    /// (leading in `y`, then in `x`). Scalar multiples share one canonical form.
    pub fn canonical(&self) -> BiPoly {
        if self.is_zero() {
            return Self::zero();
        }
        let all = || self.coeffs.iter().flat_map(|c| c.coeffs().iter());
        let l = all().fold(BigInt::one(), |l, a| l.lcm(a.denom()));
        let lr = BigRational::from_integer(l.clone());
        let g = all().fold(BigInt::zero(), |g, a| g.gcd(&(a * &lr).to_integer()));
        let mut k = BigRational::new(l, g);
        if self.lc_y().lc().is_negative() {
            k = -k;
        }
        if k.is_one() {
            return self.clone();
        }
        self.scale(&k)
    }
}

impl Add for &BiPoly {
    type Output = BiPoly;
    fn add(self, rhs: &BiPoly) -> BiPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        BiPoly::from_coeffs_y((0..n).map(|j| &self.coeff_y(j) + &rhs.coeff_y(j)).collect())
    }
}

impl Sub for &BiPoly {
    type Output = BiPoly;
    fn sub(self, rhs: &BiPoly) -> BiPoly {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        BiPoly::from_coeffs_y((0..n).map(|j| &self.coeff_y(j) - &rhs.coeff_y(j)).collect())
    }
}

impl Mul for &BiPoly {
    type Output = BiPoly;
    fn mul(self, rhs: &BiPoly) -> BiPoly {
        if self.is_zero() || rhs.is_zero() {
            return BiPoly::zero();
        }
        let mut out = vec![UPoly::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] = &out[i + j] + &(a * b);
            }
        }
        BiPoly::from_coeffs_y(out)
    }
}

impl Neg for BiPoly {
    type Output = BiPoly;
    fn neg(self) -> BiPoly {
        BiPoly {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}

impl fmt::Display for BiPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.coeffs.iter().enumerate().rev().flat_map(|(j, c)| {
            c.coeffs()
                .iter()
                .enumerate()
                .rev()
                .map(move |(i, a)| (a.clone(), i as u32, j as u32))
        });
        super::write_terms(f, terms)
    }
}
