//! Square-free factorization and decomposition of curve pairs.

use tracing::debug;

use super::Kernel;
use crate::analysis::CurveAnalysis;
use crate::poly::decompose_pair;

/// Result of `Kernel::decompose`.
///
/// If `decomposed`, both part lists start with `common` and continue with the
/// remaining cofactor of the respective curve (if it is not constant).
/// Otherwise the curves were coprime and the part lists hold the inputs.
#[derive(Clone, Debug)]
pub struct Decomposition {
    pub common: Option<CurveAnalysis>,
    pub parts1: Vec<CurveAnalysis>,
    pub parts2: Vec<CurveAnalysis>,
    pub decomposed: bool,
}

impl Kernel {
    /// Square-free factors with multiplicities, ascending by multiplicity.
    pub fn square_free_factorization(&self, ca: &CurveAnalysis) -> Vec<(CurveAnalysis, usize)> {
        ca.polynomial()
            .square_free_factorization()
            .iter()
            .map(|(p, m)| (self.construct_curve(p), *m))
            .collect()
    }

    pub fn make_square_free(&self, ca: &CurveAnalysis) -> CurveAnalysis {
        let p = ca.polynomial();
        if p.is_square_free() {
            return ca.clone();
        }
        self.construct_curve(&p.square_free_part())
    }

    /// Split two curves into their common part and coprime remainders.
    pub fn decompose(&self, ca1: &CurveAnalysis, ca2: &CurveAnalysis) -> Decomposition {
        let Some((pf, pg)) = decompose_pair(ca1.polynomial(), ca2.polynomial()) else {
            return Decomposition {
                common: None,
                parts1: vec![ca1.clone()],
                parts2: vec![ca2.clone()],
                decomposed: false,
            };
        };
        assert_eq!(pf[0], pg[0], "decomposition returned different common factors");
        let parts1: Vec<CurveAnalysis> = pf.iter().map(|p| self.construct_curve(p)).collect();
        let parts2: Vec<CurveAnalysis> = pg.iter().map(|p| self.construct_curve(p)).collect();
        debug!(
            first = %ca1.id(),
            second = %ca2.id(),
            common = %parts1[0].id(),
            "decomposed curve pair"
        );
        Decomposition {
            common: Some(parts1[0].clone()),
            parts1,
            parts2,
            decomposed: true,
        }
    }
}
