use super::*;
use crate::analysis::CurveId;
use crate::cache::CacheStats;
use crate::poly::rat;
use crate::real::{AlgebraicReal1, Sign};
use proptest::prelude::*;

fn curve(k: &Kernel, s: &str) -> CurveAnalysis {
    k.construct_curve_from_str(s).unwrap()
}

fn canonical(s: &str) -> BiPoly {
    s.parse::<BiPoly>().unwrap().canonical()
}

/// `y - py = slope * (x - px)`.
fn line_through(px: i64, py: i64, slope: i64) -> BiPoly {
    BiPoly::from_terms(&[(1, 0, 1), (-slope, 1, 0), (slope * px - py, 0, 0)])
}

#[test]
fn scalar_multiples_share_one_analysis() {
    let k = Kernel::new();
    let a = curve(&k, "x^2 + y^2 - 2");
    let b = curve(&k, "-4*x^2 - 4*y^2 + 8");
    assert!(a.is_identical(&b));
    assert_eq!(a.id(), CurveId(0));
    assert_eq!(
        k.stats().curves,
        CacheStats {
            hits: 1,
            misses: 1,
            evictions: 0
        }
    );
    let c = curve(&k, "y - x");
    assert_eq!(c.id(), CurveId(1));
    assert_eq!(k.cached_curves(), 2);
}

#[test]
fn pair_is_stored_once_and_viewed_in_argument_order() {
    let k = Kernel::new();
    let a = curve(&k, "x^2 + y^2 - 2");
    let b = curve(&k, "y - x");
    let ab = k.construct_curve_pair(&a, &b);
    let ba = k.construct_curve_pair(&b, &a);
    assert!(!ab.is_swapped());
    assert!(ba.is_swapped());
    assert!(ab.shares_storage_with(&ba));
    assert!(ba.first().is_identical(&b));
    assert!(ba.second().is_identical(&a));
    assert_eq!(ab.number_of_status_lines_with_event(), 4);
    let (l1, l2) = (ab.status_line_at_event(1), ba.status_line_at_event(1));
    for j in 0..l1.number_of_events() {
        let (u, v) = l1.curves_at_event(j);
        assert_eq!(l2.curves_at_event(j), (v, u));
    }
    assert_eq!(k.stats().pairs.hits, 1);
    assert_eq!(k.stats().pairs.misses, 1);
}

#[test]
fn gcd_is_symmetric_and_cached() {
    let k = Kernel::new();
    let p = canonical("x*y");
    let q = canonical("x*(y + 1)");
    assert_eq!(k.gcd_of(&p, &q), canonical("x"));
    assert_eq!(k.gcd_of(&q, &p), canonical("x"));
    assert_eq!(k.stats().gcds.hits, 1);
    // scaling does not change the key
    assert_eq!(k.gcd_of(&p.scale(&rat(3)), &q), canonical("x"));
    assert_eq!(k.stats().gcds.hits, 2);
}

#[test]
fn coprimality_and_square_freeness() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 2");
    let diag = curve(&k, "y - x");
    let shared = curve(&k, "(y - x)*(y + 1)");
    assert!(k.is_coprime(&circle, &diag));
    assert!(!k.is_coprime(&diag, &shared));
    assert!(!k.is_coprime(&diag, &diag));
    assert!(k.is_square_free(circle.polynomial()));
    assert!(!k.is_square_free(&canonical("(y - x)^2")));
}

#[test]
fn solve_line_and_circle() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 2");
    let diag = curve(&k, "y - x");
    let pts = k.solve(&circle, &diag).unwrap();
    assert_eq!(pts.len(), 2);
    for ((p, m), v) in pts.iter().zip([-1, 1]) {
        assert_eq!(*m, 1);
        assert_eq!(p.x().compare_rational(&rat(v)), Ordering::Equal);
        assert_eq!(p.y().compare_rational(&rat(v)), Ordering::Equal);
        // the line has the lower degree
        assert!(p.curve().is_identical(&diag));
        let f = p.to_f64();
        assert!((f.x - v as f64).abs() < 1e-12 && (f.y - v as f64).abs() < 1e-12);
    }
    assert_eq!(k.compare_x(&pts[0].0, &pts[1].0), Ordering::Less);
}

#[test]
fn solve_reports_tangency_multiplicity() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 1");
    let top = curve(&k, "y - 1");
    let pts = k.solve(&top, &circle).unwrap();
    assert_eq!(pts.len(), 1);
    assert_eq!(pts[0].1, 2);
    assert_eq!(pts[0].0.x().compare_rational(&rat(0)), Ordering::Equal);
}

#[test]
fn solve_with_vertical_line() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 1");
    let vertical = curve(&k, "x");
    let pts = k.solve(&circle, &vertical).unwrap();
    assert_eq!(pts.len(), 2);
    assert_eq!(pts[0].0.y().compare_rational(&rat(-1)), Ordering::Equal);
    assert_eq!(pts[1].0.y().compare_rational(&rat(1)), Ordering::Equal);
    assert!(pts.iter().all(|(p, m)| *m == 1 && p.curve().is_identical(&circle)));
    let tangent = curve(&k, "x - 1");
    let touch = k.solve(&circle, &tangent).unwrap();
    assert_eq!(touch.len(), 1);
    assert_eq!(touch[0].1, 2);
}

#[test]
fn solve_rejects_zero_polynomial() {
    let k = Kernel::new();
    let zero = k.construct_curve(&BiPoly::zero());
    let diag = curve(&k, "y - x");
    assert_eq!(k.solve(&zero, &diag).unwrap_err(), KernelError::ZeroCurve);
}

#[test]
fn critical_points_of_unit_circle() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 1");
    let xc = k.x_critical_points(&circle);
    assert_eq!(xc.len(), 2);
    assert_eq!(xc[0].x().compare_rational(&rat(-1)), Ordering::Equal);
    assert_eq!(xc[1].x().compare_rational(&rat(1)), Ordering::Equal);
    assert_eq!(xc[0].y().compare_rational(&rat(0)), Ordering::Equal);
    let yc = k.y_critical_points(&circle);
    assert_eq!(yc.len(), 2);
    assert_eq!(yc[0].y().compare_rational(&rat(-1)), Ordering::Equal);
    assert_eq!(yc[1].y().compare_rational(&rat(1)), Ordering::Equal);
    assert!(yc.iter().all(|p| p.curve().is_identical(&circle)));
    // the y-derivative of a vertical line vanishes identically
    assert!(k.x_critical_points(&curve(&k, "x - 3")).is_empty());
}

#[test]
fn points_compare_exactly() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 2");
    let diag = curve(&k, "y - x");
    let one = AlgebraicReal1::from_int(1);
    let low = k.construct_point(one.clone(), &circle, 0).unwrap();
    let high = k.construct_point(one.clone(), &circle, 1).unwrap();
    let on_diag = k.construct_point(one, &diag, 0).unwrap();
    assert_eq!(k.compare_xy(&high, &on_diag, true), Ordering::Equal);
    assert_eq!(k.compare_xy(&low, &on_diag, false), Ordering::Less);
    assert_eq!(k.compare_xy(&on_diag, &low, false), Ordering::Greater);
    assert_eq!(k.compare_y(&low, &high), Ordering::Less);
    assert_eq!(k.compare_xy(&low, &low, false), Ordering::Equal);

    let left = k.construct_point(AlgebraicReal1::from_int(-1), &diag, 0).unwrap();
    assert_eq!(k.compare_xy(&left, &high, false), Ordering::Less);
    assert_eq!(k.compare_y(&high, &left), Ordering::Greater);
    assert_eq!(k.compare_x_real(left.x(), high.x()), Ordering::Less);
    let b = k.boundary_between_x(&left, &high);
    assert!(b > rat(-1) && b < rat(1));
    let b = k.boundary_between_y(&low, &high);
    assert!(b > rat(-1) && b < rat(1));
}

#[test]
fn compare_results_are_cached_in_canonical_order() {
    let k = Kernel::new();
    let pts = k
        .solve(&curve(&k, "x^2 + y^2 - 2"), &curve(&k, "y - x"))
        .unwrap();
    let (p, q) = (&pts[0].0, &pts[1].0);
    assert_eq!(k.compare_xy(p, q, false), Ordering::Less);
    assert_eq!(k.stats().cmp_xy.misses, 1);
    assert_eq!(k.compare_xy(q, p, false), Ordering::Greater);
    assert_eq!(k.stats().cmp_xy.hits, 1);
}

#[test]
fn construct_point_checks_arc_range() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 2");
    let err = k
        .construct_point(AlgebraicReal1::from_int(1), &circle, 5)
        .unwrap_err();
    assert_eq!(err, KernelError::ArcOutOfRange { arcno: 5, arcs: 2 });
    assert!(k
        .construct_point(AlgebraicReal1::from_int(3), &circle, 0)
        .is_err());
}

#[test]
fn sign_on_and_off_the_curve() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 2");
    let diag = curve(&k, "y - x");
    let pts = k.solve(&circle, &diag).unwrap();
    let p = &pts[1].0; // (1, 1)
    assert_eq!(k.sign_at(&circle, p), Sign::Zero);
    assert_eq!(k.sign_at(&diag, p), Sign::Zero);
    assert_eq!(k.sign_at(&curve(&k, "x^2 + y^2 - 1"), p), Sign::Positive);
    assert_eq!(k.sign_at(&curve(&k, "y - 2"), p), Sign::Negative);
    assert_eq!(k.sign_at(&curve(&k, "x - 1"), p), Sign::Zero);
    assert_eq!(k.sign_at(&k.construct_curve(&BiPoly::zero()), p), Sign::Zero);
}

#[test]
fn sign_moves_point_to_common_factor() {
    let k = Kernel::new();
    let cross = curve(&k, "y^2 - x^2");
    let f = curve(&k, "(y - x)*(y - 3)");
    let one = AlgebraicReal1::from_int(1);
    let on = k.construct_point(one.clone(), &cross, 1).unwrap();
    assert_eq!(k.sign_at(&cross, &on), Sign::Zero);
    assert_eq!(k.sign_at(&f, &on), Sign::Zero);
    assert!(on.curve().is_identical(&curve(&k, "y - x")));
    assert_eq!(on.arcno(), 0);

    let off = k.construct_point(one, &cross, 0).unwrap();
    // (1, -1): (-2) * (-4) > 0
    assert_eq!(k.sign_at(&f, &off), Sign::Positive);
    assert!(off.curve().is_identical(&curve(&k, "y + x")));
}

#[test]
fn eviction_keeps_returned_handles_usable() {
    let cfg = KernelCfg {
        curve_cache_capacity: 2,
        ..KernelCfg::default()
    };
    let k = Kernel::with_cfg(cfg).unwrap();
    let first = curve(&k, "x - y");
    let _second = curve(&k, "x + y");
    let _third = curve(&k, "y - 3");
    assert_eq!(k.cached_curves(), 2);
    let again = curve(&k, "x - y");
    assert!(!again.is_identical(&first));
    assert_eq!(again.id(), CurveId(3));
    assert_eq!(k.stats().curves.evictions, 2);
    assert_eq!(first.polynomial(), again.polynomial());
    assert_eq!(first.number_of_status_lines_with_event(), 0);
    assert_eq!(first.status_line_of_interval(0).number_of_events(), 1);
}

#[test]
fn zero_capacity_is_rejected() {
    let cfg = KernelCfg {
        gcd_cache_capacity: 0,
        ..KernelCfg::default()
    };
    assert_eq!(
        Kernel::with_cfg(cfg).unwrap_err(),
        KernelError::InvalidCapacity { cache: "gcd" }
    );
}

#[test]
fn factorization_and_square_free_part() {
    let k = Kernel::new();
    let f = curve(&k, "(x - y)^2*x");
    let fs = k.square_free_factorization(&f);
    assert_eq!(fs.len(), 2);
    assert_eq!(fs[0].0.polynomial(), &canonical("x"));
    assert_eq!(fs[0].1, 1);
    assert_eq!(fs[1].0.polynomial(), &canonical("y - x"));
    assert_eq!(fs[1].1, 2);
    let sf = k.make_square_free(&f);
    assert_eq!(sf.polynomial(), &canonical("x*(y - x)"));
    assert!(k.make_square_free(&sf).is_identical(&sf));
}

#[test]
fn decompose_splits_off_common_line() {
    let k = Kernel::new();
    let f = curve(&k, "y^2 - x^2");
    let g = curve(&k, "(y - x)*(y - 1)");
    let d = k.decompose(&f, &g);
    assert!(d.decomposed);
    let common = d.common.clone().unwrap();
    assert_eq!(common.polynomial(), &canonical("y - x"));
    assert!(d.parts1[0].is_identical(&common));
    assert!(d.parts2[0].is_identical(&common));
    assert_eq!(d.parts1[1].polynomial(), &canonical("y + x"));
    assert_eq!(d.parts2[1].polynomial(), &canonical("y - 1"));

    let circle = curve(&k, "x^2 + y^2 - 2");
    let d = k.decompose(&circle, &g);
    assert!(!d.decomposed);
    assert!(d.common.is_none());
    assert!(d.parts1[0].is_identical(&circle));
    assert!(d.parts2[0].is_identical(&g));
}

#[test]
fn solve_tangencies_sharing_one_x() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 1");
    let ellipse = curve(&k, "x^2 + 4*y^2 - 4");
    let pts = k.solve(&circle, &ellipse).unwrap();
    assert_eq!(pts.len(), 2);
    for ((p, m), y) in pts.iter().zip([-1, 1]) {
        assert_eq!(p.x().compare_rational(&rat(0)), Ordering::Equal);
        assert_eq!(p.y().compare_rational(&rat(y)), Ordering::Equal);
        assert_eq!(*m, 2);
    }
    // both tangencies account for the full intersection count 2 * 2
    assert_eq!(pts.iter().map(|(_, m)| m).sum::<usize>(), 4);
}

#[test]
fn sign_at_irrational_points() {
    let k = Kernel::new();
    let circle = curve(&k, "x^2 + y^2 - 1");
    let steep = curve(&k, "y - 2*x");
    // (-1/sqrt5, -2/sqrt5) and (1/sqrt5, 2/sqrt5)
    let pts = k.solve(&circle, &steep).unwrap();
    assert_eq!(pts.len(), 2);
    assert!(pts[0].0.x().to_rational().is_none());
    let bigger = curve(&k, "x^2 + y^2 - 3");
    let diag = curve(&k, "y - x");
    let hyperbola = curve(&k, "10*x*y - 3");
    for ((p, _), side) in pts.iter().zip([Sign::Negative, Sign::Positive]) {
        assert_eq!(k.sign_at(&circle, p), Sign::Zero);
        assert_eq!(k.sign_at(&bigger, p), Sign::Negative);
        assert_eq!(k.sign_at(&diag, p), side);
        // 10xy = 4 at both points
        assert_eq!(k.sign_at(&hyperbola, p), Sign::Positive);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn sign_matches_exact_evaluation(
        px in -4i64..4, py in -4i64..4,
        s1 in -3i64..3, s2 in -3i64..3,
        c in proptest::collection::vec(-3i64..3, 5),
    ) {
        prop_assume!(s1 != s2);
        let k = Kernel::new();
        let l1 = k.construct_curve(&line_through(px, py, s1));
        let l2 = k.construct_curve(&line_through(px, py, s2));
        let pts = k.solve(&l1, &l2).unwrap();
        prop_assert_eq!(pts.len(), 1);
        prop_assert_eq!(pts[0].1, 1);
        let p = &pts[0].0;
        let f = BiPoly::from_terms(&[
            (c[0], 2, 0), (c[1], 0, 2), (c[2], 1, 1), (c[3], 1, 0), (c[4], 0, 0),
        ]);
        let ca = k.construct_curve(&f);
        let expected = Sign::of(&ca.polynomial().eval(&rat(px), &rat(py)));
        prop_assert_eq!(k.sign_at(&ca, p), expected);
    }

    #[test]
    fn compare_is_antisymmetric_and_lexicographic(
        a in (-4i64..4, -4i64..4), b in (-4i64..4, -4i64..4), s in 1i64..3,
    ) {
        let k = Kernel::new();
        let point = |(px, py): (i64, i64)| {
            let l1 = k.construct_curve(&line_through(px, py, s));
            let l2 = k.construct_curve(&line_through(px, py, -s));
            k.solve(&l1, &l2).unwrap().remove(0).0
        };
        let (p, q) = (point(a), point(b));
        let o = k.compare_xy(&p, &q, false);
        prop_assert_eq!(o, k.compare_xy(&q, &p, false).reverse());
        prop_assert_eq!(o, a.cmp(&b));
    }

    #[test]
    fn derivatives_at_critical_points_of_ellipses(
        a in 1i64..4, b in 1i64..4, h in -2i64..3, v in -2i64..3, r in 1i64..6,
    ) {
        // a (x - h)^2 + b (y - v)^2 = r
        let f = BiPoly::from_terms(&[
            (a, 2, 0), (-2 * a * h, 1, 0), (b, 0, 2), (-2 * b * v, 0, 1),
            (a * h * h + b * v * v - r, 0, 0),
        ]);
        let k = Kernel::new();
        let ca = k.construct_curve(&f);
        let (dx, dy) = (k.derivative_x(&ca).unwrap(), k.derivative_y(&ca).unwrap());

        // leftmost and rightmost points: f_y vanishes, f_x has the sign of x - h
        let xc = k.x_critical_points(&ca);
        prop_assert_eq!(xc.len(), 2);
        for (p, side) in xc.iter().zip([Sign::Negative, Sign::Positive]) {
            prop_assert_eq!(k.sign_at(&dy, p), Sign::Zero);
            prop_assert_eq!(k.sign_at(&dx, p), side);
            prop_assert_eq!(k.sign_at(&ca, p), Sign::Zero);
        }
        // lowest and highest points: the roles swap
        let yc = k.y_critical_points(&ca);
        prop_assert_eq!(yc.len(), 2);
        for (p, side) in yc.iter().zip([Sign::Negative, Sign::Positive]) {
            prop_assert_eq!(k.sign_at(&dx, p), Sign::Zero);
            prop_assert_eq!(k.sign_at(&dy, p), side);
        }
    }
}
