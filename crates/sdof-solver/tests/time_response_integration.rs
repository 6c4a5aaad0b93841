//! Integration tests for the closed-form time responses.

use sdof_core::{DampingRegime, Oscillator, time_grid};
use sdof_solver::{
    TimeExcitation, decay_envelope, free_vibration, impulse_response, oscillation_amplitude,
    solve_time_response, step_response,
};

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .fold(0.0_f64, |m, (x, y)| m.max((x - y).abs()))
}

/// Free vibration of an underdamped oscillator never leaves its envelope.
#[test]
fn test_free_vibration_inside_envelope() {
    let time = time_grid(5.0, 5_001).unwrap();

    for zeta in [0.01, 0.05, 0.2, 0.6, 0.95] {
        let osc = Oscillator::from_damping_ratio(1.0, 100.0, zeta).unwrap();
        let (x0, v0) = (0.01, 0.3);

        let x = free_vibration(&osc, &time, x0, v0);
        let amplitude = oscillation_amplitude(&osc, x0, v0).unwrap();
        let envelope = decay_envelope(&osc, &time, amplitude);

        for (i, (xi, ei)) in x.iter().zip(&envelope).enumerate() {
            assert!(
                xi.abs() <= ei + 1e-12,
                "ζ = {}, t = {}: |x| = {} exceeds envelope {}",
                zeta,
                time[i],
                xi.abs(),
                ei
            );
        }
    }
}

/// Step response settles at F0/k in every regime.
#[test]
fn test_step_response_settles_at_static_deflection() {
    let force = 250.0;
    let stiffness = 1.0e4;

    for (zeta, regime) in [
        (0.05, DampingRegime::Underdamped),
        (1.0, DampingRegime::CriticallyDamped),
        (3.0, DampingRegime::Overdamped),
    ] {
        let osc = Oscillator::from_damping_ratio(100.0, stiffness, zeta).unwrap();
        assert_eq!(osc.regime(), regime);

        let x = step_response(&osc, &[600.0], force)[0];
        let expected = force / stiffness;
        assert!(
            (x - expected).abs() < 1e-9 * expected,
            "{}: x(∞) = {} (expected {})",
            regime,
            x,
            expected
        );
    }
}

/// The three analytic branches agree near the critical boundary.
#[test]
fn test_continuity_across_critical_damping() {
    let time = time_grid(2.0, 2_001).unwrap();
    let below = Oscillator::from_damping_ratio(1.0, 100.0, 1.0 - 1e-4).unwrap();
    let critical = Oscillator::from_damping_ratio(1.0, 100.0, 1.0).unwrap();
    let above = Oscillator::from_damping_ratio(1.0, 100.0, 1.0 + 1e-4).unwrap();

    assert_eq!(below.regime(), DampingRegime::Underdamped);
    assert_eq!(critical.regime(), DampingRegime::CriticallyDamped);
    assert_eq!(above.regime(), DampingRegime::Overdamped);

    let h_crit = impulse_response(&critical, &time);
    let peak = h_crit.iter().cloned().fold(0.0_f64, f64::max);
    for neighbour in [&below, &above] {
        let h = impulse_response(neighbour, &time);
        let diff = max_abs_diff(&h, &h_crit);
        assert!(
            diff < 1e-3 * peak,
            "impulse response jumps by {} at ζ = {}",
            diff,
            neighbour.damping_ratio()
        );

        let step = step_response(neighbour, &time, 100.0);
        let step_crit = step_response(&critical, &time, 100.0);
        assert!(max_abs_diff(&step, &step_crit) < 1e-3);
    }
}

/// Released from rest, every regime starts at the initial displacement.
#[test]
fn test_free_vibration_starts_at_initial_displacement() {
    for zeta in [0.0, 0.1, 1.0, 4.0] {
        let osc = Oscillator::from_damping_ratio(2.0, 50.0, zeta).unwrap();
        let response = solve_time_response(&osc, &[0.0], &TimeExcitation::Free { x0: 0.3, v0: 1.0 });
        assert!((response.displacement[0] - 0.3).abs() < 1e-15);
    }
}

/// Harmonic forcing from rest starts at zero, and the transient dies out.
#[test]
fn test_harmonic_transient_decays() {
    let osc = Oscillator::from_damping_ratio(1.0, 100.0, 0.1).unwrap();
    let time = time_grid(30.0, 30_001).unwrap();

    let response = solve_time_response(&osc, &time, &TimeExcitation::harmonic(0.8));
    let steady = response.steady_state.unwrap();

    assert!(response.displacement[0].abs() < 1e-15);

    // e^(-ζωn·t) = e^(-30) by t = 30 s
    let n = time.len();
    let tail = max_abs_diff(&response.displacement[n - 1000..], &steady[n - 1000..]);
    assert!(tail < 1e-12, "transient still {} at the end of the record", tail);
}
