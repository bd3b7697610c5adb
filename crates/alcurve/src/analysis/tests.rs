use super::*;
use crate::poly::rat;
use std::cmp::Ordering;

fn curve(id: u64, s: &str) -> CurveAnalysis {
    let f: BiPoly = s.parse().unwrap();
    CurveAnalysis::new(CurveId(id), f.canonical(), Rc::new(SturmBuilder))
}

fn pair(f: &CurveAnalysis, g: &CurveAnalysis) -> CurvePairAnalysis {
    CurvePairAnalysis::new(f.clone(), g.clone(), Rc::new(SturmBuilder))
}

#[test]
fn unit_circle_topology() {
    let c = curve(0, "x^2 + y^2 - 1");
    assert_eq!(c.number_of_status_lines_with_event(), 2);
    assert_eq!(c.event_x(0).compare_rational(&rat(-1)), Ordering::Equal);
    assert_eq!(c.event_x(1).compare_rational(&rat(1)), Ordering::Equal);
    assert_eq!(c.status_line_of_interval(0).number_of_events(), 0);
    assert_eq!(c.status_line_of_interval(1).number_of_events(), 2);
    assert_eq!(c.status_line_of_interval(2).number_of_events(), 0);
    let e = c.status_line_at_event(1);
    assert!(e.is_event());
    assert!(!e.covers_line());
    assert_eq!(e.number_of_events(), 1);
    // repeated requests share the line
    assert!(Rc::ptr_eq(&e, &c.status_line_at_event(1)));
}

#[test]
fn line_lookup_by_x() {
    let c = curve(0, "x^2 + y^2 - 1");
    let inside = AlgebraicReal1::from_rational(num_rational::BigRational::new(1.into(), 3.into()));
    let l = c.status_line_for_x(&inside);
    assert!(!l.is_event());
    assert_eq!(l.index(), 1);
    let exact = c.status_line_at_exact_x(&inside);
    assert_eq!(exact.x().compare(&inside), Ordering::Equal);
    assert_eq!(exact.number_of_events(), 2);
    let at_event = c.status_line_for_x(&AlgebraicReal1::from_int(-1));
    assert!(at_event.is_event());
    assert_eq!(at_event.index(), 0);
}

#[test]
fn vertical_component_covers_its_line() {
    let c = curve(0, "x*(y - 1)");
    assert_eq!(c.number_of_status_lines_with_event(), 1);
    let e = c.status_line_at_event(0);
    assert!(e.covers_line());
    assert_eq!(e.number_of_events(), 1);
    assert!(!c.status_line_of_interval(0).covers_line());
}

#[test]
fn circle_and_diagonal_intersect_transversally() {
    let circle = curve(0, "x^2 + y^2 - 1");
    let diag = curve(1, "y - x");
    let p = pair(&circle, &diag);
    // events: -1, -1/sqrt2, 1/sqrt2, 1
    assert_eq!(p.number_of_status_lines_with_event(), 4);
    let hits: Vec<usize> = (0..4)
        .filter(|&i| p.status_line_at_event(i).is_intersection())
        .collect();
    assert_eq!(hits, vec![1, 2]);
    let low = p.status_line_at_event(1);
    assert_eq!(low.number_of_events(), 2);
    assert_eq!(low.curves_at_event(0), (Some(0), Some(0)));
    assert_eq!(low.curves_at_event(1), (Some(1), None));
    assert_eq!(low.multiplicity_of_intersection(0), 1);
    assert_eq!(low.event_of_curve(1, CurveSide::First), Some(1));
    assert_eq!(low.event_of_curve(0, CurveSide::Second), Some(0));
}

#[test]
fn swapped_view_flips_entries() {
    let circle = curve(0, "x^2 + y^2 - 1");
    let diag = curve(1, "y - x");
    let p = pair(&circle, &diag);
    let q = p.oriented(true);
    assert!(q.shares_storage_with(&p));
    assert!(q.first().is_identical(&diag));
    let high = q.status_line_at_event(2);
    // over x = 1/sqrt2: circle arcs -1/sqrt2 and 1/sqrt2, diagonal at 1/sqrt2
    assert_eq!(high.curves_at_event(0), (None, Some(0)));
    assert_eq!(high.curves_at_event(1), (Some(0), Some(1)));
    assert_eq!(high.event_of_curve(0, CurveSide::First), Some(1));
}

#[test]
fn tangency_has_multiplicity_two() {
    let circle = curve(0, "x^2 + y^2 - 1");
    let top = curve(1, "y - 1");
    let p = pair(&circle, &top);
    let lines: Vec<_> = (0..p.number_of_status_lines_with_event())
        .map(|i| p.status_line_at_event(i))
        .filter(|l| l.is_intersection())
        .collect();
    assert_eq!(lines.len(), 1);
    let l = &lines[0];
    assert_eq!(l.x().compare_rational(&rat(0)), Ordering::Equal);
    assert_eq!(l.curves_at_event(1), (Some(1), Some(0)));
    assert_eq!(l.multiplicity_of_intersection(1), 2);
}

#[test]
fn pair_status_line_for_non_event_x() {
    let circle = curve(0, "x^2 + y^2 - 4");
    let line = curve(1, "y");
    let p = pair(&circle, &line);
    let l = p.status_line_for_x(&AlgebraicReal1::from_int(0));
    assert!(!l.is_event());
    assert_eq!(l.number_of_events(), 3);
    assert_eq!(l.curves_at_event(1), (None, Some(0)));
}

#[test]
fn two_tangencies_over_one_x_each_count_twice() {
    // circle inside the ellipse, touching it at (0, -1) and (0, 1)
    let circle = curve(0, "x^2 + y^2 - 1");
    let ellipse = curve(1, "x^2 + 4*y^2 - 4");
    let p = pair(&circle, &ellipse);
    let lines: Vec<_> = (0..p.number_of_status_lines_with_event())
        .map(|i| p.status_line_at_event(i))
        .filter(|l| l.is_intersection())
        .collect();
    assert_eq!(lines.len(), 1);
    let l = &lines[0];
    assert_eq!(l.x().compare_rational(&rat(0)), Ordering::Equal);
    assert_eq!(l.curves_at_event(0), (Some(0), Some(0)));
    assert_eq!(l.curves_at_event(1), (Some(1), Some(1)));
    assert_eq!(l.multiplicity_of_intersection(0), 2);
    assert_eq!(l.multiplicity_of_intersection(1), 2);
}

#[test]
fn transversal_and_tangent_points_over_one_x() {
    // x = y^2 - 1 and x = y^3 - y differ by (y - 1)^2 (y + 1): they cross
    // at (0, -1) and touch at (0, 1)
    let parabola = curve(0, "x - y^2 + 1");
    let cubic = curve(1, "x - y^3 + y");
    let p = pair(&parabola, &cubic);
    let l = p.status_line_for_x(&AlgebraicReal1::from_int(0));
    assert!(l.is_intersection());
    let mults: Vec<usize> = (0..l.number_of_events())
        .filter(|&j| matches!(l.curves_at_event(j), (Some(_), Some(_))))
        .map(|j| l.multiplicity_of_intersection(j))
        .collect();
    assert_eq!(mults, vec![1, 2]);
}

#[test]
fn covers_line_at_reads_only_the_content() {
    let c = curve(0, "x*(y - 1)");
    assert!(c.covers_line_at(&AlgebraicReal1::from_int(0)));
    assert!(!c.covers_line_at(&AlgebraicReal1::from_int(2)));
    let circle = curve(1, "x^2 + y^2 - 1");
    let half = AlgebraicReal1::from_rational(num_rational::BigRational::new(1.into(), 2.into()));
    assert!(!circle.covers_line_at(&half));
    assert_eq!(
        circle.covers_line_at(&half),
        circle.status_line_at_exact_x(&half).covers_line()
    );
}
