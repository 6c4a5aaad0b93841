//! Force and base-motion transmissibility.
//!
//! ```text
//! TR(r) = √[(1 + (2ζr)²) / ((1 - r²)² + (2ζr)²)],  r = ω/ωn
//! ```

use std::f64::consts::SQRT_2;

use sdof_core::{FrequencyUnit, Oscillator};
use serde::Serialize;

/// Transmissibility of one oscillator over a frequency grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissibilityCurve {
    /// Damping ratio the curve was computed for.
    pub damping_ratio: f64,
    /// Frequency ratios r = ω/ωn.
    pub ratios: Vec<f64>,
    /// Transmissibility at each ratio.
    pub values: Vec<f64>,
}

/// Transmissibility at a single frequency ratio.
#[inline]
pub fn transmissibility_at(zeta: f64, r: f64) -> f64 {
    let two_zeta_r = 2.0 * zeta * r;
    let one_minus_r2 = 1.0 - r * r;
    let numerator = 1.0 + two_zeta_r * two_zeta_r;
    let denominator = one_minus_r2 * one_minus_r2 + two_zeta_r * two_zeta_r;
    (numerator / denominator).sqrt()
}

/// Transmissibility for one damping ratio over many frequency ratios.
pub fn transmissibility_normalized(zeta: f64, ratios: &[f64]) -> Vec<f64> {
    ratios.iter().map(|&r| transmissibility_at(zeta, r)).collect()
}

/// Transmissibility of an oscillator over a set of frequencies.
pub fn transmissibility(
    system: &Oscillator,
    frequencies: &[f64],
    unit: FrequencyUnit,
) -> TransmissibilityCurve {
    let omega_n = system.natural_frequency();
    let zeta = system.damping_ratio();
    let ratios: Vec<f64> = frequencies
        .iter()
        .map(|&f| unit.to_rad_per_sec(f) / omega_n)
        .collect();
    let values = transmissibility_normalized(zeta, &ratios);

    TransmissibilityCurve {
        damping_ratio: zeta,
        ratios,
        values,
    }
}

/// One transmissibility curve per damping ratio, over a shared ratio grid.
pub fn transmissibility_multi_zeta(zetas: &[f64], ratios: &[f64]) -> Vec<TransmissibilityCurve> {
    zetas
        .iter()
        .map(|&zeta| TransmissibilityCurve {
            damping_ratio: zeta,
            ratios: ratios.to_vec(),
            values: transmissibility_normalized(zeta, ratios),
        })
        .collect()
}

/// Isolation efficiency `(1 - TR)·100` in percent. Negative means amplification.
#[inline]
pub fn isolation_efficiency(tr: f64) -> f64 {
    (1.0 - tr) * 100.0
}

/// Frequency ratio at which every transmissibility curve equals 1.
pub fn crossover_ratio() -> f64 {
    SQRT_2
}

/// Frequency (Hz) above which the oscillator isolates: √2·fn.
pub fn isolation_start_frequency(system: &Oscillator) -> f64 {
    SQRT_2 * system.natural_frequency_hz()
}

/// Frequency ratio of the transmissibility peak.
///
/// Approximated by `√(1-2ζ²)` for ζ < 0.5; heavier damping reports no peak (0).
pub fn peak_transmissibility_ratio(zeta: f64) -> f64 {
    if zeta >= 0.5 {
        return 0.0;
    }
    (1.0 - 2.0 * zeta * zeta).sqrt()
}

/// Peak transmissibility value; infinite for an undamped isolator.
pub fn peak_transmissibility(zeta: f64) -> f64 {
    if zeta <= 0.0 {
        return f64::INFINITY;
    }
    let r_peak = peak_transmissibility_ratio(zeta);
    if r_peak == 0.0 {
        return 1.0;
    }
    transmissibility_at(zeta, r_peak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossover_is_unity_for_any_damping() {
        let r = crossover_ratio();
        for zeta in [0.0, 0.01, 0.1, 0.5, 1.0, 2.5] {
            let tr = transmissibility_at(zeta, r);
            assert!(
                (tr - 1.0).abs() < 1e-12,
                "TR(ζ={}, r=√2) = {} (expected 1.0)",
                zeta,
                tr
            );
        }

        // Truncated ratio as typed by a user
        for zeta in [0.1, 0.5] {
            let tr = transmissibility_at(zeta, 1.41421356);
            assert!((tr - 1.0).abs() < 1e-7);
        }
    }

    #[test]
    fn test_static_and_resonant_values() {
        assert!((transmissibility_at(0.1, 0.0) - 1.0).abs() < 1e-15);

        // At r = 1: TR = √(1 + 4ζ²) / (2ζ)
        let zeta: f64 = 0.05;
        let expected = (1.0 + 4.0 * zeta * zeta).sqrt() / (2.0 * zeta);
        assert!((transmissibility_at(zeta, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_isolation_region() {
        let tr = transmissibility_normalized(0.1, &[2.0, 5.0, 10.0]);
        assert!(tr.iter().all(|&v| v < 1.0));
        assert!(tr.windows(2).all(|w| w[1] < w[0]));
        assert!(isolation_efficiency(tr[2]) > 95.0);
    }

    #[test]
    fn test_dimensional_curve() {
        // ωn = 10 rad/s
        let osc = Oscillator::from_damping_ratio(1.0, 100.0, 0.2).unwrap();
        let curve = transmissibility(&osc, &[5.0, 10.0, 20.0], FrequencyUnit::RadiansPerSecond);

        assert_eq!(curve.ratios, vec![0.5, 1.0, 2.0]);
        assert!((curve.damping_ratio - 0.2).abs() < 1e-12);
        assert!((curve.values[1] - transmissibility_at(0.2, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_multi_zeta_broadcast() {
        let ratios = [0.5, 1.0, 3.0];
        let curves = transmissibility_multi_zeta(&[0.05, 0.2, 0.7], &ratios);

        assert_eq!(curves.len(), 3);
        for curve in &curves {
            assert_eq!(curve.values.len(), ratios.len());
        }
        // More damping lowers the resonant peak and raises the isolation tail
        assert!(curves[0].values[1] > curves[1].values[1]);
        assert!(curves[0].values[2] < curves[2].values[2]);
    }

    #[test]
    fn test_isolation_start_frequency() {
        let osc = Oscillator::from_damping_ratio(1.0, 100.0, 0.1).unwrap();
        let expected = SQRT_2 * 10.0 / (2.0 * std::f64::consts::PI);
        assert!((isolation_start_frequency(&osc) - expected).abs() < 1e-12);
        assert!(isolation_efficiency(1.0).abs() < 1e-12);
    }

    #[test]
    fn test_peak_transmissibility() {
        assert!(peak_transmissibility(0.0).is_infinite());
        assert_eq!(peak_transmissibility(0.6), 1.0);

        let peak = peak_transmissibility(0.05);
        assert!(peak > 10.0 && peak < 10.1, "peak TR = {}", peak);
    }
}
