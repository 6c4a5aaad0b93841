//! Newmark-β integration of a base-excited oscillator.
//!
//! The relative displacement `x` of a unit-mass oscillator on a moving base
//! obeys
//!
//! ```text
//! ẍ + 2ζωn·ẋ + ωn²·x = -ü_base(t)
//! ```
//!
//! Each step solves one scalar equation `k_eff·x[i+1] = p_eff[i+1]` and
//! updates velocity and acceleration from the displacement increment.

use std::f64::consts::PI;

use sdof_core::Error as CoreError;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Newmark family parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewmarkParams {
    pub gamma: f64,
    pub beta: f64,
}

impl NewmarkParams {
    /// Constant average acceleration (trapezoidal rule), unconditionally stable.
    pub const AVERAGE_ACCELERATION: Self = Self {
        gamma: 0.5,
        beta: 0.25,
    };

    /// Linear acceleration, stable for `dt < 0.551·T`.
    pub const LINEAR_ACCELERATION: Self = Self {
        gamma: 0.5,
        beta: 1.0 / 6.0,
    };
}

impl Default for NewmarkParams {
    fn default() -> Self {
        Self::AVERAGE_ACCELERATION
    }
}

/// Displacement, velocity and acceleration at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NewmarkState {
    pub displacement: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// Single-oscillator Newmark integrator.
///
/// Holds only the latest state; callers decide what to record.
#[derive(Debug, Clone)]
pub struct NewmarkIntegrator {
    omega_n: f64,
    zeta: f64,
    dt: f64,
    params: NewmarkParams,
    k_eff: f64,
    state: NewmarkState,
}

impl NewmarkIntegrator {
    /// Create an integrator for natural frequency `natural_frequency_hz`,
    /// damping ratio `zeta` and step `dt`, starting at rest.
    pub fn new(natural_frequency_hz: f64, zeta: f64, dt: f64) -> Result<Self> {
        if !(natural_frequency_hz.is_finite() && natural_frequency_hz > 0.0) {
            return Err(Error::InvalidFrequency(natural_frequency_hz));
        }
        if !(zeta.is_finite() && zeta >= 0.0) {
            return Err(CoreError::InvalidParameter {
                name: "damping_ratio",
                value: zeta,
            }
            .into());
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(CoreError::InvalidParameter {
                name: "time_step",
                value: dt,
            }
            .into());
        }

        let mut integrator = Self {
            omega_n: 2.0 * PI * natural_frequency_hz,
            zeta,
            dt,
            params: NewmarkParams::default(),
            k_eff: 0.0,
            state: NewmarkState::default(),
        };
        integrator.k_eff = integrator.effective_stiffness();
        Ok(integrator)
    }

    /// Use a different member of the Newmark family.
    pub fn with_params(mut self, params: NewmarkParams) -> Self {
        self.params = params;
        self.k_eff = self.effective_stiffness();
        self
    }

    /// Start from displacement `x0` and velocity `v0` with base acceleration
    /// `base0` acting at t = 0. The initial acceleration follows from the
    /// equation of motion.
    pub fn with_initial_conditions(mut self, x0: f64, v0: f64, base0: f64) -> Self {
        let c = 2.0 * self.zeta * self.omega_n;
        self.state = NewmarkState {
            displacement: x0,
            velocity: v0,
            acceleration: -base0 - c * v0 - self.omega_n * self.omega_n * x0,
        };
        self
    }

    /// Angular natural frequency (rad/s).
    pub fn natural_frequency(&self) -> f64 {
        self.omega_n
    }

    pub fn time_step(&self) -> f64 {
        self.dt
    }

    pub fn state(&self) -> NewmarkState {
        self.state
    }

    /// `ωn² + γ/(β·dt)·2ζωn + 1/(β·dt²)`
    pub fn effective_stiffness(&self) -> f64 {
        let NewmarkParams { gamma, beta } = self.params;
        let dt = self.dt;
        self.omega_n * self.omega_n
            + gamma / (beta * dt) * 2.0 * self.zeta * self.omega_n
            + 1.0 / (beta * dt * dt)
    }

    /// Advance one step under base acceleration `base_next` at the end of the
    /// step. Returns the new relative displacement.
    #[inline]
    pub fn step(&mut self, base_next: f64) -> f64 {
        let NewmarkParams { gamma, beta } = self.params;
        let dt = self.dt;
        let c = 2.0 * self.zeta * self.omega_n;
        let NewmarkState {
            displacement: x,
            velocity: v,
            acceleration: a,
        } = self.state;

        let p_eff = -base_next
            + x / (beta * dt * dt)
            + v / (beta * dt)
            + (1.0 / (2.0 * beta) - 1.0) * a
            + c * (gamma / (beta * dt) * x
                + (gamma / beta - 1.0) * v
                + dt * (gamma / (2.0 * beta) - 1.0) * a);

        let x_next = p_eff / self.k_eff;
        let dx = x_next - x;

        self.state = NewmarkState {
            displacement: x_next,
            velocity: gamma / (beta * dt) * dx
                + (1.0 - gamma / beta) * v
                + dt * (1.0 - gamma / (2.0 * beta)) * a,
            acceleration: dx / (beta * dt * dt)
                - v / (beta * dt)
                - (1.0 / (2.0 * beta) - 1.0) * a,
        };

        x_next
    }
}

/// Relative displacement history of an oscillator at rest on a base that
/// accelerates as `base`, sampled every `dt`.
///
/// The first sample is zero; the output has the same length as `base`.
pub fn integrate_base_excitation(
    natural_frequency_hz: f64,
    zeta: f64,
    base: &[f64],
    dt: f64,
) -> Result<Vec<f64>> {
    let (&base0, rest) = base.split_first().ok_or(Error::EmptyRecord)?;

    let mut integrator = NewmarkIntegrator::new(natural_frequency_hz, zeta, dt)?
        .with_initial_conditions(0.0, 0.0, base0);

    let mut x = Vec::with_capacity(base.len());
    x.push(0.0);
    x.extend(rest.iter().map(|&b| integrator.step(b)));
    Ok(x)
}
