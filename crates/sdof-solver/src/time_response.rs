//! Closed-form time-domain responses.
//!
//! Every response is evaluated on a caller-supplied time grid. Samples at
//! `t < 0` are zero. The damping regime is read from the oscillator on every
//! call and selects one of three analytic solutions:
//!
//! | regime    | homogeneous solution                          |
//! |-----------|-----------------------------------------------|
//! | ζ < 1     | `e^(-ζωn·t)·(A cos ωd·t + B sin ωd·t)`         |
//! | ζ = 1     | `(A + B·t)·e^(-ωn·t)`                          |
//! | ζ > 1     | `A·e^(s1·t) + B·e^(s2·t)`, `s1,2 = -ωn(ζ ∓ √(ζ²-1))` |

use std::f64::consts::PI;

use sdof_core::{DampingRegime, Oscillator};
use serde::{Deserialize, Serialize};

/// Excitation of a time-domain analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeExcitation {
    /// Unit impulse at t = 0.
    Impulse,
    /// Constant force `force` (N) applied from t = 0.
    Step { force: f64 },
    /// Force `force·sin(2πf·t)`.
    Harmonic {
        frequency_hz: f64,
        force: f64,
        include_transient: bool,
    },
    /// Unforced motion from initial displacement (m) and velocity (m/s).
    Free { x0: f64, v0: f64 },
    /// Exponential decay envelope with initial amplitude `amplitude`.
    Envelope { amplitude: f64 },
}

impl TimeExcitation {
    /// Unit step force.
    pub fn unit_step() -> Self {
        TimeExcitation::Step { force: 1.0 }
    }

    /// Unit-amplitude harmonic force including the start-up transient.
    pub fn harmonic(frequency_hz: f64) -> Self {
        TimeExcitation::Harmonic {
            frequency_hz,
            force: 1.0,
            include_transient: true,
        }
    }

    /// Release from unit displacement at rest.
    pub fn released() -> Self {
        TimeExcitation::Free { x0: 1.0, v0: 0.0 }
    }

    /// Short name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            TimeExcitation::Impulse => "impulse",
            TimeExcitation::Step { .. } => "step",
            TimeExcitation::Harmonic { .. } => "harmonic",
            TimeExcitation::Free { .. } => "free",
            TimeExcitation::Envelope { .. } => "envelope",
        }
    }
}

/// Displacement history produced by [`solve_time_response`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeResponse {
    /// Displacement at each requested time.
    pub displacement: Vec<f64>,
    /// Steady-state component; only present for harmonic excitation.
    pub steady_state: Option<Vec<f64>>,
}

/// Total and steady-state parts of a harmonic response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonicResponse {
    /// Steady state plus start-up transient (when requested and available).
    pub total: Vec<f64>,
    /// Steady-state response `X·sin(ωt - φ)`.
    pub steady_state: Vec<f64>,
}

/// Evaluate the response to `excitation` on the time grid `time`.
pub fn solve_time_response(
    system: &Oscillator,
    time: &[f64],
    excitation: &TimeExcitation,
) -> TimeResponse {
    log::debug!(
        "{} response of {} oscillator over {} samples",
        excitation.name(),
        system.regime(),
        time.len()
    );

    match *excitation {
        TimeExcitation::Impulse => TimeResponse {
            displacement: impulse_response(system, time),
            steady_state: None,
        },
        TimeExcitation::Step { force } => TimeResponse {
            displacement: step_response(system, time, force),
            steady_state: None,
        },
        TimeExcitation::Harmonic {
            frequency_hz,
            force,
            include_transient,
        } => {
            let response = harmonic_response(system, time, frequency_hz, force, include_transient);
            TimeResponse {
                displacement: response.total,
                steady_state: Some(response.steady_state),
            }
        }
        TimeExcitation::Free { x0, v0 } => TimeResponse {
            displacement: free_vibration(system, time, x0, v0),
            steady_state: None,
        },
        TimeExcitation::Envelope { amplitude } => TimeResponse {
            displacement: decay_envelope(system, time, amplitude),
            steady_state: None,
        },
    }
}

/// Apply `f` to every non-negative time, zero elsewhere.
#[inline]
fn causal(time: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    time.iter()
        .map(|&t| if t >= 0.0 { f(t) } else { 0.0 })
        .collect()
}

/// Real roots `s1 > s2` of the overdamped characteristic equation.
#[inline]
fn overdamped_roots(omega_n: f64, zeta: f64) -> (f64, f64) {
    let root = (zeta * zeta - 1.0).sqrt();
    (-omega_n * (zeta - root), -omega_n * (zeta + root))
}

/// Impulse response h(t): displacement per unit impulse (m/(N·s)).
pub fn impulse_response(system: &Oscillator, time: &[f64]) -> Vec<f64> {
    let m = system.mass();
    let wn = system.natural_frequency();
    let zeta = system.damping_ratio();

    match system.regime() {
        DampingRegime::Underdamped => {
            let wd = system.damped_frequency();
            causal(time, |t| (-zeta * wn * t).exp() * (wd * t).sin() / (m * wd))
        }
        DampingRegime::CriticallyDamped => causal(time, |t| t * (-wn * t).exp() / m),
        DampingRegime::Overdamped => {
            // e^(-ζωn·t)·sinh(ωo·t) written as a difference of decaying exponentials
            let (s1, s2) = overdamped_roots(wn, zeta);
            let wo = (s1 - s2) / 2.0;
            causal(time, |t| ((s1 * t).exp() - (s2 * t).exp()) / (2.0 * m * wo))
        }
    }
}

/// Response to a force step of magnitude `force`, settling at `force / k`.
pub fn step_response(system: &Oscillator, time: &[f64], force: f64) -> Vec<f64> {
    let wn = system.natural_frequency();
    let zeta = system.damping_ratio();
    let x_static = force / system.stiffness();

    match system.regime() {
        DampingRegime::Underdamped => {
            let wd = system.damped_frequency();
            let k = zeta / (1.0 - zeta * zeta).sqrt();
            causal(time, |t| {
                x_static * (1.0 - (-zeta * wn * t).exp() * ((wd * t).cos() + k * (wd * t).sin()))
            })
        }
        DampingRegime::CriticallyDamped => {
            causal(time, |t| x_static * (1.0 - (1.0 + wn * t) * (-wn * t).exp()))
        }
        DampingRegime::Overdamped => {
            let (s1, s2) = overdamped_roots(wn, zeta);
            causal(time, |t| {
                x_static * (1.0 + (s1 * (s2 * t).exp() - s2 * (s1 * t).exp()) / (s2 - s1))
            })
        }
    }
}

/// Steady-state amplitude and phase lag (rad) for a force `force·sin(ωt)`.
pub fn steady_state_amplitude(system: &Oscillator, omega: f64, force: f64) -> (f64, f64) {
    let real = system.stiffness() - system.mass() * omega * omega;
    let imag = system.damping() * omega;
    (force / real.hypot(imag), imag.atan2(real))
}

/// Response to `force·sin(2πf·t)` from rest.
///
/// With `include_transient`, an underdamped oscillator gets the decaying
/// homogeneous term that makes displacement and velocity zero at t = 0.
/// Critically damped and overdamped oscillators return the steady state
/// alone in both fields.
pub fn harmonic_response(
    system: &Oscillator,
    time: &[f64],
    frequency_hz: f64,
    force: f64,
    include_transient: bool,
) -> HarmonicResponse {
    let omega = 2.0 * PI * frequency_hz;
    let (amplitude, phi) = steady_state_amplitude(system, omega, force);
    let steady_state = causal(time, |t| amplitude * (omega * t - phi).sin());

    if !include_transient {
        return HarmonicResponse {
            total: steady_state.clone(),
            steady_state,
        };
    }

    let total = match system.regime() {
        DampingRegime::Underdamped => {
            let wn = system.natural_frequency();
            let zeta = system.damping_ratio();
            let wd = system.damped_frequency();

            // Cancel the steady-state displacement and slope at the origin
            let x0 = amplitude * phi.sin();
            let v0 = -amplitude * omega * phi.cos();
            let a = x0;
            let b = (v0 + zeta * wn * x0) / wd;

            let transient = causal(time, |t| {
                (-zeta * wn * t).exp() * (a * (wd * t).cos() + b * (wd * t).sin())
            });
            steady_state
                .iter()
                .zip(&transient)
                .map(|(s, tr)| s + tr)
                .collect()
        }
        DampingRegime::CriticallyDamped | DampingRegime::Overdamped => steady_state.clone(),
    };

    HarmonicResponse {
        total,
        steady_state,
    }
}

/// Free vibration from initial displacement `x0` and velocity `v0`.
pub fn free_vibration(system: &Oscillator, time: &[f64], x0: f64, v0: f64) -> Vec<f64> {
    let wn = system.natural_frequency();
    let zeta = system.damping_ratio();

    match system.regime() {
        DampingRegime::Underdamped => {
            let wd = system.damped_frequency();
            let a = x0;
            let b = (v0 + zeta * wn * x0) / wd;
            causal(time, |t| {
                (-zeta * wn * t).exp() * (a * (wd * t).cos() + b * (wd * t).sin())
            })
        }
        DampingRegime::CriticallyDamped => {
            let a = x0;
            let b = v0 + wn * x0;
            causal(time, |t| (a + b * t) * (-wn * t).exp())
        }
        DampingRegime::Overdamped => {
            let (s1, s2) = overdamped_roots(wn, zeta);
            let a = (v0 - s2 * x0) / (s1 - s2);
            let b = (s1 * x0 - v0) / (s1 - s2);
            causal(time, |t| a * (s1 * t).exp() + b * (s2 * t).exp())
        }
    }
}

/// Amplitude `√(A² + B²)` of underdamped free vibration, i.e. the initial
/// value of the envelope that bounds it. `None` outside the underdamped regime.
pub fn oscillation_amplitude(system: &Oscillator, x0: f64, v0: f64) -> Option<f64> {
    if system.regime() != DampingRegime::Underdamped {
        return None;
    }
    let b = (v0 + system.damping_ratio() * system.natural_frequency() * x0)
        / system.damped_frequency();
    Some(x0.hypot(b))
}

/// Decay envelope `amplitude·e^(-ζωn·t)`.
///
/// Only meaningful for ζ < 1, where it bounds the oscillation amplitude.
pub fn decay_envelope(system: &Oscillator, time: &[f64], amplitude: f64) -> Vec<f64> {
    let decay_rate = system.damping_ratio() * system.natural_frequency();
    causal(time, |t| amplitude * (-decay_rate * t).exp())
}

/// Logarithmic decrement δ = 2πζ/√(1-ζ²); infinite for ζ ≥ 1.
pub fn logarithmic_decrement_from_ratio(zeta: f64) -> f64 {
    if zeta >= 1.0 {
        return f64::INFINITY;
    }
    2.0 * PI * zeta / (1.0 - zeta * zeta).sqrt()
}

/// Logarithmic decrement of an oscillator.
pub fn logarithmic_decrement(system: &Oscillator) -> f64 {
    logarithmic_decrement_from_ratio(system.damping_ratio())
}
