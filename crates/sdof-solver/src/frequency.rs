//! Frequency-domain transfer functions.
//!
//! The receptance of a force-driven oscillator is
//!
//! ```text
//! H(ω) = X/F = 1 / ((k - mω²) + jcω)
//! ```
//!
//! Velocity and acceleration (mobility, accelerance) follow by multiplying
//! with jω and -ω².

use num_complex::Complex;
use sdof_core::{FrequencyUnit, Oscillator};
use serde::{Deserialize, Serialize};

/// Response quantity of a transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputKind {
    /// Displacement per unit force (receptance).
    #[default]
    Displacement,
    /// Velocity per unit force (mobility).
    Velocity,
    /// Acceleration per unit force (accelerance).
    Acceleration,
}

/// A single frequency point of a transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrfPoint {
    /// Frequency, in the unit of the request.
    pub frequency: f64,
    /// Complex transfer value.
    pub response: Complex<f64>,
}

/// Result of a transfer-function evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct FrfResult {
    /// Evaluated points, in request order.
    pub points: Vec<FrfPoint>,
    /// Unit of the point frequencies.
    pub unit: FrequencyUnit,
    /// Response quantity.
    pub output: OutputKind,
    /// Stiffness used as the static-compliance reference for dB values.
    pub stiffness: f64,
}

impl FrfResult {
    /// Magnitude in dB referenced to the static compliance 1/k:
    /// `20·log10(|H|·k)`.
    pub fn magnitude_db(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| 20.0 * (p.response.norm() * self.stiffness).log10())
            .collect()
    }

    /// Phase in degrees, in (-180, 180].
    pub fn phase_deg(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.response.arg().to_degrees())
            .collect()
    }

    /// Raw complex values.
    pub fn values(&self) -> Vec<Complex<f64>> {
        self.points.iter().map(|p| p.response).collect()
    }

    /// All frequency values.
    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Magnitude and phase of the dimensionless transfer function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    /// |H(r)|, the dynamic amplification factor.
    pub magnitude: Vec<f64>,
    /// Phase in degrees.
    pub phase_deg: Vec<f64>,
}

/// Complex reciprocal that keeps IEEE semantics at a zero denominator.
///
/// An exact zero (undamped system driven at ωn) yields an infinite real
/// part rather than the `0/0` that plain complex division produces.
#[inline]
fn reciprocal(den: Complex<f64>) -> Complex<f64> {
    if den.re == 0.0 && den.im == 0.0 {
        return Complex::new(f64::INFINITY, f64::NAN);
    }
    Complex::new(1.0, 0.0) / den
}

/// Receptance H(ω) at a single angular frequency.
pub fn receptance(system: &Oscillator, omega: f64) -> Complex<f64> {
    let den = Complex::new(
        system.stiffness() - system.mass() * omega * omega,
        system.damping() * omega,
    );
    reciprocal(den)
}

/// Evaluate the transfer function over a set of frequencies.
///
/// Each frequency is converted to ω with `unit`. At ω = ωn with zero damping
/// the magnitude is infinite; this is the expected limit, not an error.
pub fn transfer_function(
    system: &Oscillator,
    frequencies: &[f64],
    unit: FrequencyUnit,
    output: OutputKind,
) -> FrfResult {
    let points = frequencies
        .iter()
        .map(|&frequency| {
            let omega = unit.to_rad_per_sec(frequency);
            let h = receptance(system, omega);
            let response = match output {
                OutputKind::Displacement => h,
                OutputKind::Velocity => Complex::new(0.0, omega) * h,
                OutputKind::Acceleration => h * (-omega * omega),
            };
            FrfPoint {
                frequency,
                response,
            }
        })
        .collect();

    FrfResult {
        points,
        unit,
        output,
        stiffness: system.stiffness(),
    }
}

/// Dimensionless transfer function `H(r) = 1 / ((1 - r²) + j2ζr)`.
pub fn normalized_transfer(zeta: f64, ratios: &[f64]) -> NormalizedResponse {
    let (magnitude, phase_deg) = ratios
        .iter()
        .map(|&r| {
            let h = reciprocal(Complex::new(1.0 - r * r, 2.0 * zeta * r));
            (h.norm(), h.arg().to_degrees())
        })
        .unzip();

    NormalizedResponse {
        magnitude,
        phase_deg,
    }
}

/// Peak dynamic amplification `1/(2ζ√(1-ζ²))`.
///
/// Returns 1 for ζ ≥ 1/√2, where the magnitude curve has no peak.
pub fn resonance_amplitude(zeta: f64) -> f64 {
    if zeta >= std::f64::consts::FRAC_1_SQRT_2 {
        return 1.0;
    }
    1.0 / (2.0 * zeta * (1.0 - zeta * zeta).sqrt())
}

/// Frequency ratio of the displacement peak, `√(1-2ζ²)`; 0 when no peak exists.
pub fn resonance_frequency_ratio(zeta: f64) -> f64 {
    if zeta >= std::f64::consts::FRAC_1_SQRT_2 {
        return 0.0;
    }
    (1.0 - 2.0 * zeta * zeta).sqrt()
}

/// Half-power bandwidth Δω ≈ 2ζωn (rad/s), valid for light damping.
pub fn half_power_bandwidth(system: &Oscillator) -> f64 {
    2.0 * system.damping_ratio() * system.natural_frequency()
}
