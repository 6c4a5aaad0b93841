//! Single-degree-of-freedom mass-spring-damper model.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Relative tolerance on the damping ratio for classifying a system as
/// critically damped.
pub const CRITICAL_TOLERANCE: f64 = 1e-6;

/// Damping regime of an oscillator.
///
/// Every closed-form response branches on this tag, so matching on it is
/// exhaustive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DampingRegime {
    /// ζ < 1: decaying oscillation at the damped frequency.
    Underdamped,
    /// ζ = 1 (within [`CRITICAL_TOLERANCE`]): fastest non-oscillatory return.
    CriticallyDamped,
    /// ζ > 1: non-oscillatory, two real decay rates.
    Overdamped,
}

impl DampingRegime {
    /// Classify a damping ratio.
    ///
    /// The critical band is checked first so that ratios just below 1.0 are
    /// not reported as underdamped with a vanishing damped frequency.
    pub fn from_ratio(zeta: f64) -> Self {
        if (zeta - 1.0).abs() <= CRITICAL_TOLERANCE {
            DampingRegime::CriticallyDamped
        } else if zeta < 1.0 {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }
}

impl fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DampingRegime::Underdamped => "underdamped",
            DampingRegime::CriticallyDamped => "critically damped",
            DampingRegime::Overdamped => "overdamped",
        };
        f.write_str(name)
    }
}

/// Linear SDOF oscillator `m·ẍ + c·ẋ + k·x = F(t)`.
///
/// Immutable once built. All derived quantities are recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Oscillator {
    mass: f64,
    stiffness: f64,
    damping: f64,
}

impl Oscillator {
    /// Create an oscillator from mass (kg), stiffness (N/m) and viscous
    /// damping coefficient (N·s/m).
    ///
    /// Only structural checks are made: mass and stiffness must be finite and
    /// positive, damping finite and non-negative.
    pub fn new(mass: f64, stiffness: f64, damping: f64) -> Result<Self> {
        check_positive("mass", mass)?;
        check_positive("stiffness", stiffness)?;
        check_non_negative("damping", damping)?;
        Ok(Self {
            mass,
            stiffness,
            damping,
        })
    }

    /// Create an oscillator from mass, stiffness and damping ratio ζ.
    ///
    /// The damping coefficient is `c = ζ·cc` with `cc = 2√(km)`.
    pub fn from_damping_ratio(mass: f64, stiffness: f64, zeta: f64) -> Result<Self> {
        check_positive("mass", mass)?;
        check_positive("stiffness", stiffness)?;
        check_non_negative("damping ratio", zeta)?;
        let damping = zeta * 2.0 * (stiffness * mass).sqrt();
        Self::new(mass, stiffness, damping)
    }

    /// Mass (kg).
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Stiffness (N/m).
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Viscous damping coefficient (N·s/m).
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Undamped natural frequency ωn = √(k/m) in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Undamped natural frequency in Hz.
    pub fn natural_frequency_hz(&self) -> f64 {
        self.natural_frequency() / (2.0 * PI)
    }

    /// Critical damping coefficient cc = 2√(km).
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio ζ = c / cc.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping()
    }

    /// Damped natural frequency ωd = ωn√(1-ζ²) in rad/s, zero when ζ ≥ 1.
    pub fn damped_frequency(&self) -> f64 {
        let zeta = self.damping_ratio();
        if zeta >= 1.0 {
            return 0.0;
        }
        self.natural_frequency() * (1.0 - zeta * zeta).sqrt()
    }

    /// Damped natural frequency in Hz.
    pub fn damped_frequency_hz(&self) -> f64 {
        self.damped_frequency() / (2.0 * PI)
    }

    /// Quality factor Q = 1/(2ζ); infinite for an undamped system.
    pub fn quality_factor(&self) -> f64 {
        1.0 / (2.0 * self.damping_ratio())
    }

    /// Damping regime of this oscillator.
    pub fn regime(&self) -> DampingRegime {
        DampingRegime::from_ratio(self.damping_ratio())
    }

    pub fn is_underdamped(&self) -> bool {
        self.regime() == DampingRegime::Underdamped
    }

    pub fn is_critically_damped(&self) -> bool {
        self.regime() == DampingRegime::CriticallyDamped
    }

    pub fn is_overdamped(&self) -> bool {
        self.regime() == DampingRegime::Overdamped
    }
}

impl fmt::Display for Oscillator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SDOF oscillator ({}):", self.regime())?;
        writeln!(f, "  Mass: {:.4} kg", self.mass)?;
        writeln!(f, "  Stiffness: {:.4} N/m", self.stiffness)?;
        writeln!(f, "  Damping: {:.4} N·s/m", self.damping)?;
        writeln!(
            f,
            "  Natural freq: {:.4} rad/s ({:.4} Hz)",
            self.natural_frequency(),
            self.natural_frequency_hz()
        )?;
        writeln!(f, "  Damping ratio: {:.4}", self.damping_ratio())?;
        write!(
            f,
            "  Damped freq: {:.4} rad/s ({:.4} Hz)",
            self.damped_frequency(),
            self.damped_frequency_hz()
        )
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter { name, value });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidParameter { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_properties() {
        // m=1, k=100 → ωn = 10 rad/s, cc = 20
        let osc = Oscillator::new(1.0, 100.0, 2.0).unwrap();

        assert!((osc.natural_frequency() - 10.0).abs() < 1e-12);
        assert!((osc.critical_damping() - 20.0).abs() < 1e-12);
        assert!((osc.damping_ratio() - 0.1).abs() < 1e-12);

        let expected_wd = 10.0 * (1.0 - 0.01_f64).sqrt();
        assert!(
            (osc.damped_frequency() - expected_wd).abs() < 1e-12,
            "ωd = {} (expected {})",
            osc.damped_frequency(),
            expected_wd
        );
        assert!((osc.natural_frequency_hz() - 10.0 / (2.0 * PI)).abs() < 1e-12);
        assert!((osc.quality_factor() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_damping_ratio_round_trip() {
        let osc = Oscillator::from_damping_ratio(10.0, 1000.0, 0.3).unwrap();

        assert!(
            (osc.damping_ratio() - 0.3).abs() < 1e-12,
            "ζ = {} (expected 0.3)",
            osc.damping_ratio()
        );
        assert!(
            (osc.natural_frequency() - 10.0).abs() < 1e-12,
            "ωn = {} (expected 10.0)",
            osc.natural_frequency()
        );
    }

    #[test]
    fn test_regime_classification() {
        let under = Oscillator::from_damping_ratio(1.0, 100.0, 0.5).unwrap();
        let critical = Oscillator::from_damping_ratio(1.0, 100.0, 1.0).unwrap();
        let over = Oscillator::from_damping_ratio(1.0, 100.0, 2.0).unwrap();

        assert_eq!(under.regime(), DampingRegime::Underdamped);
        assert_eq!(critical.regime(), DampingRegime::CriticallyDamped);
        assert_eq!(over.regime(), DampingRegime::Overdamped);

        assert!(under.is_underdamped());
        assert!(critical.is_critically_damped());
        assert!(over.is_overdamped());
    }

    #[test]
    fn test_critical_band() {
        assert_eq!(
            DampingRegime::from_ratio(1.0 - 1e-7),
            DampingRegime::CriticallyDamped
        );
        assert_eq!(
            DampingRegime::from_ratio(1.0 + 1e-7),
            DampingRegime::CriticallyDamped
        );
        assert_eq!(
            DampingRegime::from_ratio(1.0 - 1e-4),
            DampingRegime::Underdamped
        );
        assert_eq!(
            DampingRegime::from_ratio(1.0 + 1e-4),
            DampingRegime::Overdamped
        );
    }

    #[test]
    fn test_damped_frequency_zero_when_not_underdamped() {
        let over = Oscillator::from_damping_ratio(2.0, 50.0, 1.5).unwrap();
        assert_eq!(over.damped_frequency(), 0.0);
    }

    #[test]
    fn test_undamped_system() {
        let osc = Oscillator::new(1.0, 100.0, 0.0).unwrap();
        assert_eq!(osc.damping_ratio(), 0.0);
        assert!((osc.damped_frequency() - 10.0).abs() < 1e-12);
        assert!(osc.quality_factor().is_infinite());
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert_eq!(
            Oscillator::new(0.0, 100.0, 1.0),
            Err(Error::InvalidParameter {
                name: "mass",
                value: 0.0
            })
        );
        assert!(Oscillator::new(1.0, -5.0, 1.0).is_err());
        assert!(Oscillator::new(1.0, 100.0, -0.1).is_err());
        assert!(Oscillator::new(f64::NAN, 100.0, 1.0).is_err());
        assert!(Oscillator::from_damping_ratio(1.0, 100.0, -0.2).is_err());
    }

    #[test]
    fn test_display_summary() {
        let osc = Oscillator::from_damping_ratio(1.0, 100.0, 0.05).unwrap();
        let text = osc.to_string();
        assert!(text.starts_with("SDOF oscillator (underdamped):"));
        assert!(text.contains("Natural freq: 10.0000 rad/s"));
    }
}
