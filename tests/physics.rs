use cvd_process_simulator::cvd::physics::{
    compute_c2h2_pp, process_pressure, solve_ar_flow, solve_c2h2_flow, solve_total_pressure,
};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

#[test]
fn c2h2_pp_from_flows_and_pressure() {
    // 5 / 50 * 0.99
    assert_close(compute_c2h2_pp(5.0, 45.0, 1.0, 0.01), 0.099, 1e-12);
    assert_close(process_pressure(1.0, 0.01), 0.99, 1e-12);
}

#[test]
fn c2h2_pp_zero_when_no_flow_or_pressure() {
    assert_eq!(compute_c2h2_pp(0.0, 0.0, 1.0, 0.01), 0.0);
    assert_eq!(compute_c2h2_pp(5.0, 45.0, 0.01, 0.01), 0.0);
    assert_eq!(compute_c2h2_pp(5.0, 45.0, 0.005, 0.01), 0.0);
}

#[test]
fn total_pressure_floor_is_contaminant_pp() {
    assert_eq!(solve_total_pressure(0.0, 50.0, 0.02, 0.25), 0.02);
    assert_eq!(solve_total_pressure(5.0, 50.0, 0.02, 0.0), 0.02);
    assert_eq!(solve_total_pressure(5.0, 50.0, 0.02, -1.0), 0.02);
}

#[test]
fn total_pressure_inversion() {
    // 0.25 * 50 / 5 + 0.01
    assert_close(solve_total_pressure(5.0, 45.0, 0.01, 0.25), 2.51, 1e-12);
}

#[test]
fn c2h2_flow_inversion() {
    let f = solve_c2h2_flow(1.0, 0.01, 45.0, 0.25);
    assert_close(f, 0.25 * 45.0 / (0.99 - 0.25), 1e-12);
    assert_close(f, 15.2027, 1e-4);
}

#[test]
fn c2h2_flow_zero_when_target_unreachable() {
    // 공정 압력 == 목표 분압: 분모 0
    assert_eq!(solve_c2h2_flow(0.26, 0.01, 45.0, 0.25), 0.0);
    assert_eq!(solve_c2h2_flow(0.2, 0.01, 45.0, 0.25), 0.0);
    assert_eq!(solve_c2h2_flow(1.0, 0.01, 45.0, 0.0), 0.0);
}

#[test]
fn ar_flow_inversion_and_guards() {
    assert_close(solve_ar_flow(5.0, 1.0, 0.01, 0.25), 5.0 * (0.99 / 0.25 - 1.0), 1e-12);
    assert_eq!(solve_ar_flow(0.0, 1.0, 0.01, 0.25), 0.0);
    assert_eq!(solve_ar_flow(5.0, 1.0, 0.01, 0.0), 0.0);
    assert_eq!(solve_ar_flow(5.0, 0.26, 0.01, 0.25), 0.0);
}

proptest! {
    #[test]
    fn solved_total_pressure_reaches_target(
        c2h2 in 0.1f64..100.0,
        ar in 0.0f64..200.0,
        contam in 0.0f64..0.5,
        target in 0.001f64..5.0,
    ) {
        let p = solve_total_pressure(c2h2, ar, contam, target);
        let pp = compute_c2h2_pp(c2h2, ar, p, contam);
        prop_assert!((pp - target).abs() <= 1e-9 * target.max(1.0));
    }

    #[test]
    fn total_pressure_recovered_from_computed_pp(
        fc in 0.1f64..100.0,
        fa in 0.0f64..200.0,
        p_contam in 0.0f64..0.5,
        excess in 0.001f64..10.0,
    ) {
        let p_total = p_contam + excess;
        let pp = compute_c2h2_pp(fc, fa, p_total, p_contam);
        let solved = solve_total_pressure(fc, fa, p_contam, pp);
        prop_assert!(
            (solved - p_total).abs() <= 1e-9 * p_total,
            "solved={} p_total={}", solved, p_total
        );
    }

    #[test]
    fn solved_c2h2_flow_reaches_target(
        ar in 0.1f64..200.0,
        contam in 0.0f64..0.5,
        target in 0.001f64..1.0,
        margin in 0.01f64..9.0,
    ) {
        let p_total = contam + target + margin;
        let f = solve_c2h2_flow(p_total, contam, ar, target);
        prop_assert!(f > 0.0);
        let pp = compute_c2h2_pp(f, ar, p_total, contam);
        prop_assert!((pp - target).abs() <= 1e-9);
    }

    #[test]
    fn solved_ar_flow_reaches_target(
        c2h2 in 0.1f64..100.0,
        contam in 0.0f64..0.5,
        target in 0.001f64..1.0,
        margin in 0.01f64..9.0,
    ) {
        let p_total = contam + target + margin;
        let ar = solve_ar_flow(c2h2, p_total, contam, target);
        prop_assert!(ar >= 0.0);
        let pp = compute_c2h2_pp(c2h2, ar, p_total, contam);
        prop_assert!((pp - target).abs() <= 1e-9);
    }

    #[test]
    fn solvers_never_return_negative_flow(
        a in -10.0f64..100.0,
        b in -10.0f64..100.0,
        c in -1.0f64..1.0,
        t in -1.0f64..5.0,
    ) {
        prop_assert!(solve_c2h2_flow(a, c, b.max(0.0), t) >= 0.0);
        prop_assert!(solve_ar_flow(b.max(0.0), a, c, t) >= 0.0);
    }
}
