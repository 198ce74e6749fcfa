#![warn(clippy::pedantic)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use approx::assert_relative_eq;
use strapx::{solve, Equilibrium, PhysicalParams, SolveError};

/// Parameters and strap length for which `(theta_g, l, theta_s)` is an exact
/// equilibrium, built from the balance equations directly.
fn construct(g1: f64, theta_com: f64, theta_g: f64, theta_s: f64) -> (f64, f64, f64) {
    let segment = g1 * theta_g.cos() / theta_s.cos();
    let phi = PI - theta_com - theta_g;

    // Horizontal: (L - l) cos(theta_s) = g2 cos(phi)
    // Vertical:   (L - l) sin(theta_s) + g2 sin(phi) = g1 sin(theta_g) + l sin(theta_s)
    let rise = g1 * theta_g.sin() + segment * theta_s.sin();
    let det = theta_s.cos() * phi.sin() + theta_s.sin() * phi.cos();
    let remainder = rise * phi.cos() / det;
    let g2 = rise * theta_s.cos() / det;

    (g2, segment + remainder, segment)
}

#[test]
fn literal_design_returns_finite_equilibrium() {
    let equilibrium = solve(
        174.002_873_539_490_7,
        181.994_505_411_564_55,
        3.031_256_255_944_968_7,
        400.0,
    )
    .expect("equilibrium exists");

    assert!(equilibrium.guitar_angle.is_finite());
    assert!(equilibrium.strap_angle.is_finite());
    assert!(equilibrium.left_strap_seg_len.is_finite());
    assert!(equilibrium.left_strap_seg_len > 0.0 && equilibrium.left_strap_seg_len < 400.0);
}

#[test]
fn symmetric_design_splits_strap_evenly() {
    let equilibrium = solve(100.0, 100.0, FRAC_PI_2, 300.0).expect("equilibrium exists");
    assert_relative_eq!(equilibrium.guitar_angle, FRAC_PI_4, epsilon = 1.0e-9);
    assert_relative_eq!(equilibrium.left_strap_seg_len, 150.0, epsilon = 1.0e-9);
    assert_relative_eq!(equilibrium.right_strap_seg_len(300.0), 150.0, epsilon = 1.0e-9);
    let expected_strap = (100.0 * FRAC_PI_4.cos() / 150.0).acos();
    assert_relative_eq!(equilibrium.strap_angle, expected_strap, epsilon = 1.0e-9);
}

#[test]
fn constructed_equilibria_are_recovered() {
    for (g1, theta_com, theta_g, theta_s) in [
        (100.0, 2.0, 0.3, 1.1),
        (150.0, 1.8, 0.2, 1.0),
        (100.0, 1.6, 0.0, 1.1),
    ] {
        let (g2, strap_length, segment) = construct(g1, theta_com, theta_g, theta_s);
        assert!(g2 > 0.0 && strap_length > segment);

        let equilibrium = solve(g1, g2, theta_com, strap_length).expect("equilibrium exists");
        assert_relative_eq!(equilibrium.left_strap_seg_len, segment, epsilon = 1.0e-6);
        assert_relative_eq!(equilibrium.guitar_angle, theta_g, epsilon = 1.0e-6);
        assert_relative_eq!(equilibrium.strap_angle, theta_s, epsilon = 1.0e-6);
    }
}

#[test]
fn repeated_calls_agree() {
    let first = solve(150.0, 110.0, 2.2, 420.0);
    let second = solve(150.0, 110.0, 2.2, 420.0);
    assert_eq!(first, second);
}

#[test]
fn valid_inputs_yield_single_result_or_infeasible() {
    for g2 in [40.0, 90.0, 160.0] {
        for theta_com in [0.4, 1.2, 2.0, 2.8, 3.05] {
            let params = PhysicalParams::new(120.0, g2, theta_com).expect("valid");
            for stretch in [1.05, 1.5, 3.0] {
                let strap_length = params.button_span() * stretch;
                match params.solve(strap_length) {
                    Ok(Equilibrium {
                        left_strap_seg_len, ..
                    }) => {
                        assert!(left_strap_seg_len > 0.0 && left_strap_seg_len < strap_length);
                    }
                    Err(SolveError::Infeasible) => {}
                    Err(other) => panic!("unexpected failure {other:?} for g2={g2}, theta={theta_com}"),
                }
            }
        }
    }
}

#[test]
fn strap_shorter_than_span_has_no_equilibrium() {
    assert_eq!(solve(100.0, 100.0, FRAC_PI_2, 100.0), Err(SolveError::Infeasible));
}
