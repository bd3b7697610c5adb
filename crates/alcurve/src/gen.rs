//! Seeded random curves for tests, benches and the CLI.
//!
//! Model
//! - Dense polynomials with integer coefficients drawn uniformly from
//!   `[-coeff_bound, coeff_bound]`; each monomial of total degree `≤ degree`
//!   is kept with probability `density`. The `y^degree` term is always
//!   non-zero, so the curve has no vertical asymptotes.
//! - Determinism uses a replay token `(seed, index)` mixed into one `StdRng`,
//!   so draw `i` of a batch can be reproduced on its own.
//!
//! Code cross-refs: `Kernel::construct_curve`, `benches/kernel_bench.rs`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::poly::BiPoly;

/// Polynomial sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct PolyGenCfg {
    pub degree: u32,
    pub coeff_bound: i64,
    /// Probability of keeping a monomial, clamped to `[0, 1]`.
    pub density: f64,
}

impl Default for PolyGenCfg {
    fn default() -> Self {
        Self {
            degree: 3,
            coeff_bound: 5,
            density: 0.7,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// The token of the next draw in the same batch.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

fn nonzero<R: Rng>(rng: &mut R, bound: i64) -> i64 {
    let b = bound.max(1);
    let v = rng.gen_range(1..=b);
    if rng.gen_bool(0.5) {
        v
    } else {
        -v
    }
}

/// Random polynomial with a non-vanishing `y^degree` coefficient.
pub fn random_poly(cfg: PolyGenCfg, tok: ReplayToken) -> BiPoly {
    let mut rng = tok.to_std_rng();
    let d = cfg.degree.max(1);
    let b = cfg.coeff_bound.max(1);
    let p = cfg.density.clamp(0.0, 1.0);
    let mut terms = vec![(nonzero(&mut rng, b), 0, d)];
    for total in 0..=d {
        for ey in 0..=total {
            if ey == d || !rng.gen_bool(p) {
                continue;
            }
            terms.push((rng.gen_range(-b..=b), total - ey, ey));
        }
    }
    BiPoly::from_terms(&terms)
}

/// Random non-vertical line `a·x + b·y + c` with `b ≠ 0`.
pub fn random_line(bound: i64, tok: ReplayToken) -> BiPoly {
    let mut rng = tok.to_std_rng();
    let b = bound.max(1);
    BiPoly::from_terms(&[
        (rng.gen_range(-b..=b), 1, 0),
        (nonzero(&mut rng, b), 0, 1),
        (rng.gen_range(-b..=b), 0, 0),
    ])
}

/// Random circle `(x - cx)^2 + (y - cy)^2 - r^2` with integer centre and
/// radius in `1..=bound`.
pub fn random_circle(bound: i64, tok: ReplayToken) -> BiPoly {
    let mut rng = tok.to_std_rng();
    let b = bound.max(1);
    let (cx, cy) = (rng.gen_range(-b..=b), rng.gen_range(-b..=b));
    let r = rng.gen_range(1..=b);
    BiPoly::from_terms(&[
        (1, 2, 0),
        (-2 * cx, 1, 0),
        (1, 0, 2),
        (-2 * cy, 0, 1),
        (cx * cx + cy * cy - r * r, 0, 0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_reproducible() {
        let tok = ReplayToken::new(7, 3);
        let cfg = PolyGenCfg::default();
        assert_eq!(random_poly(cfg, tok), random_poly(cfg, tok));
        assert_eq!(random_line(5, tok.next()), random_line(5, ReplayToken::new(7, 4)));
    }

    #[test]
    fn leading_y_term_survives() {
        let cfg = PolyGenCfg {
            degree: 4,
            coeff_bound: 3,
            density: 0.0,
        };
        for i in 0..16 {
            let f = random_poly(cfg, ReplayToken::new(1, i));
            assert_eq!(f.degree_y(), 4);
            assert_eq!(f.total_degree(), 4);
        }
    }

    #[test]
    fn circles_have_real_points() {
        for i in 0..8 {
            let c = random_circle(4, ReplayToken::new(11, i));
            assert_eq!(c.degree_y(), 2);
            assert_eq!(c.degree_x(), 2);
        }
    }
}
