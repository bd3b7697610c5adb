//! Real roots of `f(α, y)` for an algebraic `α`.
//!
//! Arithmetic happens in `Q(α)[y]`, with `Q(α)` represented as `Q[x]` modulo
//! a factor of the defining polynomial of `α`. The defining polynomial need
//! not be irreducible: whenever a zero divisor shows up (a coefficient
//! vanishes at `α`, or an inverse does not exist), the modulus is replaced by
//! the factor that still has `α` as a root. Zero tests themselves are exact
//! sign computations at `α`.

use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::cell::RefCell;
use std::cmp::Ordering;

use super::algebraic::AlgebraicReal1;
use super::interval::{Interval, Sign};
use super::isolate::{isolate, refine_isolated, RootCounter};
use crate::poly::{count_variations, rat, BiPoly, UPoly};

/// Arithmetic context for `Q(α)`.
#[derive(Debug)]
pub(crate) struct ExtCtx {
    alpha: AlgebraicReal1,
    modulus: UPoly,
}

impl ExtCtx {
    pub(crate) fn new(alpha: &AlgebraicReal1) -> Self {
        let modulus = match alpha.to_rational() {
            Some(r) => UPoly::linear_root(&r),
            None => alpha.poly(),
        };
        Self {
            alpha: alpha.clone(),
            modulus,
        }
    }

    fn reduce(&self, c: &UPoly) -> UPoly {
        if c.is_zero() || c.degree() < self.modulus.degree() {
            c.clone()
        } else {
            c.rem(&self.modulus)
        }
    }

    fn sign(&self, c: &UPoly) -> Sign {
        self.alpha.sign_of(&self.reduce(c))
    }

    fn is_zero(&mut self, c: &UPoly) -> bool {
        let c = self.reduce(c);
        if c.is_zero() {
            return true;
        }
        if self.alpha.sign_of(&c) != Sign::Zero {
            return false;
        }
        self.modulus = self.modulus.gcd(&c);
        true
    }

    /// Inverse of a coefficient that does not vanish at `α`.
    fn inverse(&mut self, c: &UPoly) -> UPoly {
        let c = self.reduce(c);
        let g = self.modulus.gcd(&c);
        if !g.is_constant() {
            self.modulus = self.modulus.exact_div(&g);
        }
        let (g, s, _) = c.ext_gcd(&self.modulus);
        assert!(g.is_one(), "inverting a coefficient that vanishes at alpha");
        self.reduce(&s)
    }

    /// Reduce coefficients and drop leading ones that vanish at `α`.
    fn normalize(&mut self, p: &BiPoly) -> BiPoly {
        let mut cs: Vec<UPoly> = p.coeffs_y().iter().map(|c| self.reduce(c)).collect();
        while let Some(top) = cs.last() {
            if self.is_zero(top) {
                cs.pop();
            } else {
                break;
            }
        }
        BiPoly::from_coeffs_y(cs)
    }

    /// Remainder of `a` modulo a normalized non-zero `b`.
    fn rem(&mut self, a: &BiPoly, b: &BiPoly) -> BiPoly {
        let inv = self.inverse(&b.lc_y());
        let dn = b.degree_y();
        let mut r = self.normalize(a);
        while !r.is_zero() && r.degree_y() >= dn {
            let k = r.degree_y() - dn;
            let top = r.degree_y();
            let q = self.reduce(&(&r.lc_y() * &inv));
            let next = &r - &b.mul_x(&q).shift_y(k);
            let mut cs = next.coeffs_y().to_vec();
            cs.truncate(top);
            r = self.normalize(&BiPoly::from_coeffs_y(cs));
        }
        r
    }

    fn monic(&mut self, p: &BiPoly) -> BiPoly {
        if p.is_zero() {
            return BiPoly::zero();
        }
        let inv = self.inverse(&p.lc_y());
        p.mul_x(&inv).map_coeffs(|c| self.reduce(c))
    }

    fn gcd(&mut self, a: &BiPoly, b: &BiPoly) -> BiPoly {
        let mut p = self.normalize(a);
        let mut q = self.normalize(b);
        if p.degree_y() < q.degree_y() {
            std::mem::swap(&mut p, &mut q);
        }
        while !q.is_zero() {
            let r = self.rem(&p, &q);
            p = q;
            q = r;
        }
        self.monic(&p)
    }

    fn sturm(&mut self, p: &BiPoly) -> Vec<BiPoly> {
        let mut seq = vec![p.clone()];
        if p.degree_y() == 0 {
            return seq;
        }
        seq.push(self.normalize(&p.derivative_y()));
        loop {
            let n = seq.len();
            let r = self.rem(&seq[n - 2], &seq[n - 1]);
            if r.is_zero() {
                return seq;
            }
            seq.push(-r);
        }
    }

    /// Strict bound on the absolute value of the real roots of a normalized `p`.
    fn root_bound(&mut self, p: &BiPoly) -> BigRational {
        let lc = p.lc_y();
        let low = loop {
            let m = lc.eval_interval(&self.alpha.interval()).mignitude();
            if m.is_positive() {
                break m;
            }
            self.alpha.refine();
        };
        let iv = self.alpha.interval();
        let mut high = BigRational::zero();
        for c in &p.coeffs_y()[..p.degree_y()] {
            let m = c.eval_interval(&iv).magnitude();
            if m > high {
                high = m;
            }
        }
        high / low + rat(2)
    }
}

struct FiberCounter<'a> {
    ctx: &'a mut ExtCtx,
    seq: &'a [BiPoly],
}

impl FiberCounter<'_> {
    fn variations(&mut self, y: &BigRational) -> usize {
        let signs: Vec<Sign> = self
            .seq
            .iter()
            .map(|p| self.ctx.sign(&p.eval_y(y)))
            .collect();
        count_variations(signs.into_iter())
    }
}

impl RootCounter for FiberCounter<'_> {
    fn is_root(&mut self, t: &BigRational) -> bool {
        self.ctx.sign(&self.seq[0].eval_y(t)) == Sign::Zero
    }

    fn count(&mut self, a: &BigRational, b: &BigRational) -> usize {
        self.variations(a).saturating_sub(self.variations(b))
    }
}

/// The real `y`-roots of `f(α, y)`, ascending, with refinable isolating
/// intervals. A fiber of a polynomial vanishing identically at `α` has no
/// isolated roots and reports `vanishes_identically`.
#[derive(Debug)]
pub struct Fiber {
    alpha: AlgebraicReal1,
    ctx: RefCell<ExtCtx>,
    poly: BiPoly,
    sturm: Vec<BiPoly>,
    bound: BigRational,
    roots: RefCell<Vec<Interval>>,
    vanishes: bool,
}

impl Fiber {
    pub fn new(alpha: &AlgebraicReal1, f: &BiPoly) -> Fiber {
        let mut ctx = ExtCtx::new(alpha);
        let poly = ctx.normalize(f);
        Self::from_normalized(alpha, ctx, poly)
    }

    fn from_normalized(alpha: &AlgebraicReal1, mut ctx: ExtCtx, poly: BiPoly) -> Fiber {
        let vanishes = poly.is_zero();
        let (sturm, bound, roots) = if poly.degree_y() == 0 {
            (vec![poly.clone()], BigRational::zero(), Vec::new())
        } else {
            let sturm = ctx.sturm(&poly);
            let bound = ctx.root_bound(&poly);
            let mut counter = FiberCounter {
                ctx: &mut ctx,
                seq: &sturm,
            };
            let roots = isolate(&mut counter, -bound.clone(), bound.clone());
            (sturm, bound, roots)
        };
        Fiber {
            alpha: alpha.clone(),
            ctx: RefCell::new(ctx),
            poly,
            sturm,
            bound,
            roots: RefCell::new(roots),
            vanishes,
        }
    }

    pub fn alpha(&self) -> &AlgebraicReal1 {
        &self.alpha
    }

    /// The normalized fiber polynomial (coefficients reduced modulo `α`).
    pub fn polynomial(&self) -> &BiPoly {
        &self.poly
    }

    pub fn vanishes_identically(&self) -> bool {
        self.vanishes
    }

    pub fn number_of_roots(&self) -> usize {
        self.roots.borrow().len()
    }

    pub fn root_interval(&self, j: usize) -> Interval {
        self.roots.borrow()[j].clone()
    }

    pub fn refine_root(&self, j: usize) {
        let mut ctx = self.ctx.borrow_mut();
        let mut roots = self.roots.borrow_mut();
        let mut counter = FiberCounter {
            ctx: &mut *ctx,
            seq: &self.sturm,
        };
        refine_isolated(&mut counter, &mut roots[j]);
    }

    /// Sign of `f(α, y)`.
    pub fn sign_at(&self, y: &BigRational) -> Sign {
        self.ctx.borrow().sign(&self.poly.eval_y(y))
    }

    pub fn is_root(&self, y: &BigRational) -> bool {
        !self.vanishes && self.sign_at(y) == Sign::Zero
    }

    /// Distinct roots in `(a, b]`; `a`, `b` must not be roots.
    pub fn count_in(&self, a: &BigRational, b: &BigRational) -> usize {
        if self.sturm.len() < 2 {
            return 0;
        }
        let mut ctx = self.ctx.borrow_mut();
        let mut counter = FiberCounter {
            ctx: &mut *ctx,
            seq: &self.sturm,
        };
        counter.count(a, b)
    }

    /// Fiber of `gcd(f(α, y), g(α, y))`; both fibers must share `α`.
    pub fn common(&self, other: &Fiber) -> Fiber {
        let mut ctx = ExtCtx::new(&self.alpha);
        let g = ctx.gcd(&self.poly, &other.poly);
        Self::from_normalized(&self.alpha, ctx, g)
    }

    /// Compare root `j` with a rational.
    pub fn compare_root_with(&self, j: usize, r: &BigRational) -> Ordering {
        loop {
            let iv = self.root_interval(j);
            if iv.is_point() {
                return iv.lo.cmp(r);
            }
            if r <= &iv.lo {
                return Ordering::Greater;
            }
            if r >= &iv.hi {
                return Ordering::Less;
            }
            if self.is_root(r) {
                self.roots.borrow_mut()[j] = Interval::point(r.clone());
                return Ordering::Equal;
            }
            self.refine_root(j);
        }
    }

    /// Index among this fiber's roots of `other`'s root `j`, which must also
    /// be a root here.
    pub fn root_index_of(&self, other: &Fiber, j: usize) -> usize {
        loop {
            let iv = other.root_interval(j);
            if iv.is_point() {
                let r = iv.lo;
                return match (0..self.number_of_roots())
                    .find(|&k| self.compare_root_with(k, &r) == Ordering::Equal)
                {
                    Some(k) => k,
                    None => panic!("rational fiber root {r} is not shared"),
                };
            }
            if !self.is_root(&iv.lo) && !self.is_root(&iv.hi) && self.count_in(&iv.lo, &iv.hi) == 1
            {
                return self.count_in(&-self.bound.clone(), &iv.lo);
            }
            other.refine_root(j);
        }
    }

    /// Order of root `i` here and root `j` of `other`; the values must differ.
    pub fn compare_roots(&self, i: usize, other: &Fiber, j: usize) -> Ordering {
        loop {
            let (a, b) = (self.root_interval(i), other.root_interval(j));
            if a.hi <= b.lo {
                return Ordering::Less;
            }
            if b.hi <= a.lo {
                return Ordering::Greater;
            }
            self.refine_root(i);
            other.refine_root(j);
        }
    }
}
