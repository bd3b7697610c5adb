//! Resultants in `y` via a fraction-free determinant of the Sylvester matrix.

use super::bipoly::BiPoly;
use super::upoly::UPoly;

impl BiPoly {
    /// `res_y(self, other)` as a polynomial in `x`.
    ///
    /// Zero if either argument is zero. For a `y`-constant argument the
    /// resultant degenerates to a power of that constant.
    pub fn resultant_y(&self, other: &BiPoly) -> UPoly {
        if self.is_zero() || other.is_zero() {
            return UPoly::zero();
        }
        let (m, n) = (self.degree_y(), other.degree_y());
        let size = m + n;
        let mut mat = vec![vec![UPoly::zero(); size]; size];
        for (row, slot) in mat.iter_mut().enumerate().take(n) {
            for (i, c) in self.coeffs_y().iter().rev().enumerate() {
                slot[row + i] = c.clone();
            }
        }
        for (row, slot) in mat.iter_mut().skip(n).enumerate() {
            for (i, c) in other.coeffs_y().iter().rev().enumerate() {
                slot[row + i] = c.clone();
            }
        }
        bareiss_det(mat)
    }
}

/// Determinant over `Q[x]` by Bareiss elimination with row pivoting.
/// Every intermediate division is exact.
pub(crate) fn bareiss_det(mut m: Vec<Vec<UPoly>>) -> UPoly {
    let n = m.len();
    if n == 0 {
        return UPoly::one();
    }
    let mut negate = false;
    let mut prev = UPoly::one();
    for k in 0..n - 1 {
        if m[k][k].is_zero() {
            match (k + 1..n).find(|&i| !m[i][k].is_zero()) {
                Some(i) => {
                    m.swap(k, i);
                    negate = !negate;
                }
                None => return UPoly::zero(),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = &(&m[k][k] * &m[i][j]) - &(&m[i][k] * &m[k][j]);
                m[i][j] = num.exact_div(&prev);
            }
        }
        prev = m[k][k].clone();
    }
    let det = m[n - 1][n - 1].clone();
    if negate {
        -det
    } else {
        det
    }
}
