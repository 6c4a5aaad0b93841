//! Frequency units and engineering-notation formatting.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Unit of a frequency value crossing an API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrequencyUnit {
    /// Cycles per second.
    #[default]
    Hertz,
    /// Angular frequency.
    RadiansPerSecond,
}

impl FrequencyUnit {
    /// Convert a value in this unit to rad/s.
    #[inline]
    pub fn to_rad_per_sec(self, value: f64) -> f64 {
        match self {
            FrequencyUnit::Hertz => 2.0 * PI * value,
            FrequencyUnit::RadiansPerSecond => value,
        }
    }

    /// Convert a value in this unit to Hz.
    #[inline]
    pub fn to_hertz(self, value: f64) -> f64 {
        match self {
            FrequencyUnit::Hertz => value,
            FrequencyUnit::RadiansPerSecond => value / (2.0 * PI),
        }
    }

    /// Short label for table headers.
    pub fn label(self) -> &'static str {
        match self {
            FrequencyUnit::Hertz => "Hz",
            FrequencyUnit::RadiansPerSecond => "rad/s",
        }
    }
}

/// Format a value with an SI prefix.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value >= 1e12 {
        (value / 1e12, "T")
    } else if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "M")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 || abs_value == 0.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else if abs_value >= 1e-12 {
        (value * 1e12, "p")
    } else {
        (value, "")
    };

    format!("{:.4}{}", scaled, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((FrequencyUnit::Hertz.to_rad_per_sec(1.0) - 2.0 * PI).abs() < 1e-12);
        assert_eq!(FrequencyUnit::RadiansPerSecond.to_rad_per_sec(3.0), 3.0);
        assert!((FrequencyUnit::RadiansPerSecond.to_hertz(2.0 * PI) - 1.0).abs() < 1e-12);
        assert_eq!(FrequencyUnit::Hertz.to_hertz(50.0), 50.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1000.0), "1.0000k");
        assert_eq!(format_value(0.001), "1.0000m");
        assert_eq!(format_value(2.5e-6), "2.5000u");
        assert_eq!(format_value(0.0), "0.0000");
        assert_eq!(format_value(f64::INFINITY), "inf");
    }
}
