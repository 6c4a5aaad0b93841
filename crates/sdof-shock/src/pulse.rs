//! Standard shock pulses sampled as base-acceleration records.
//!
//! A record spans ten pulse durations: the pulse occupies the first
//! ⌊D/dt⌋ samples and the rest is zero so that the residual response of
//! low-frequency oscillators is captured.

use std::f64::consts::PI;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Record length in units of the pulse duration.
pub const RECORD_DURATIONS: f64 = 10.0;

/// Shape of a shock pulse over normalized time τ = t/D ∈ [0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseKind {
    /// `A·sin(πτ)`
    HalfSine,
    /// Symmetric rise and fall with the apex at mid-pulse.
    Triangular,
    /// Constant `A`.
    Rectangular,
    /// Haversine `A·(1 - cos 2πτ)/2`.
    VersedSine,
    /// Linear rise over the first quarter, hold over the middle half, linear fall.
    Trapezoidal,
    /// `A·(1 - τ)`
    InitialPeakSawtooth,
    /// `A·τ`
    TerminalPeakSawtooth,
}

impl PulseKind {
    pub const ALL: [PulseKind; 7] = [
        PulseKind::HalfSine,
        PulseKind::Triangular,
        PulseKind::Rectangular,
        PulseKind::VersedSine,
        PulseKind::Trapezoidal,
        PulseKind::InitialPeakSawtooth,
        PulseKind::TerminalPeakSawtooth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PulseKind::HalfSine => "half_sine",
            PulseKind::Triangular => "triangular",
            PulseKind::Rectangular => "rectangular",
            PulseKind::VersedSine => "versed_sine",
            PulseKind::Trapezoidal => "trapezoidal",
            PulseKind::InitialPeakSawtooth => "initial_peak_sawtooth",
            PulseKind::TerminalPeakSawtooth => "terminal_peak_sawtooth",
        }
    }
}

impl fmt::Display for PulseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PulseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        PulseKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| Error::InvalidPulse(format!("unknown pulse kind '{}'", s)))
    }
}

/// Number of whole steps of size `dt` in `span`, snapping quotients that
/// miss an integer only by rounding.
fn whole_steps(span: f64, dt: f64) -> usize {
    let steps = span / dt;
    let nearest = steps.round();
    if (steps - nearest).abs() < 1e-9 * steps.max(1.0) {
        nearest as usize
    } else {
        steps.floor() as usize
    }
}

/// Number of samples `0, dt, 2dt, ...` strictly below `span`.
fn samples_below(span: f64, dt: f64) -> usize {
    let steps = span / dt;
    let nearest = steps.round();
    if (steps - nearest).abs() < 1e-9 * steps.max(1.0) {
        nearest as usize
    } else {
        steps.ceil() as usize
    }
}

/// A parametrized shock pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockPulse {
    kind: PulseKind,
    duration: f64,
    amplitude: f64,
    time_step: f64,
}

impl ShockPulse {
    /// Create a pulse of `duration` seconds and peak `amplitude`, sampled
    /// every `time_step` seconds.
    ///
    /// The time step must not exceed the duration, otherwise the pulse would
    /// have no samples.
    pub fn new(kind: PulseKind, duration: f64, amplitude: f64, time_step: f64) -> Result<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(Error::InvalidPulse(format!(
                "duration must be positive, got {}",
                duration
            )));
        }
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(Error::InvalidPulse(format!(
                "time step must be positive, got {}",
                time_step
            )));
        }
        if time_step > duration {
            return Err(Error::InvalidPulse(format!(
                "time step {} exceeds pulse duration {}",
                time_step, duration
            )));
        }
        if !amplitude.is_finite() {
            return Err(Error::InvalidPulse(format!(
                "amplitude must be finite, got {}",
                amplitude
            )));
        }

        Ok(Self {
            kind,
            duration,
            amplitude,
            time_step,
        })
    }

    pub fn kind(&self) -> PulseKind {
        self.kind
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Number of non-zero-padded samples, ⌊D/dt⌋.
    pub fn pulse_samples(&self) -> usize {
        whole_steps(self.duration, self.time_step)
    }

    /// Total number of samples in `[0, 10·D)`.
    pub fn record_len(&self) -> usize {
        samples_below(RECORD_DURATIONS * self.duration, self.time_step)
    }

    /// Base acceleration at sample `index`.
    pub fn acceleration_at(&self, index: usize) -> f64 {
        let n = self.pulse_samples();
        if index >= n {
            return 0.0;
        }

        let a = self.amplitude;
        let tau = index as f64 * self.time_step / self.duration;

        match self.kind {
            PulseKind::HalfSine => a * (PI * tau).sin(),
            PulseKind::Triangular => {
                if tau < 0.5 {
                    2.0 * a * tau
                } else {
                    2.0 * a * (1.0 - tau)
                }
            }
            PulseKind::Rectangular => a,
            PulseKind::VersedSine => a * (1.0 - (2.0 * PI * tau).cos()) / 2.0,
            PulseKind::Trapezoidal => {
                let rise = n / 4;
                let fall_start = rise + n / 2;
                if rise == 0 {
                    // Too few samples to ramp
                    a
                } else if index < rise {
                    a * index as f64 / rise as f64
                } else if index < fall_start {
                    a
                } else {
                    // fall spans the remaining n - fall_start >= rise samples
                    let fall = n - fall_start;
                    a * (1.0 - (index - fall_start) as f64 / fall as f64)
                }
            }
            PulseKind::InitialPeakSawtooth => a * (1.0 - tau),
            PulseKind::TerminalPeakSawtooth => a * tau,
        }
    }

    /// Lazily evaluated `(time, acceleration)` samples of the full record.
    ///
    /// Clones continue from the same position; call `samples()` again to
    /// start over.
    pub fn samples(&self) -> PulseSamples {
        PulseSamples {
            pulse: *self,
            index: 0,
            len: self.record_len(),
        }
    }

    /// Collect the full record.
    pub fn generate(&self) -> PulseRecord {
        let (time, acceleration) = self.samples().unzip();
        PulseRecord { time, acceleration }
    }
}

/// Iterator over the samples of a [`ShockPulse`] record.
#[derive(Debug, Clone)]
pub struct PulseSamples {
    pulse: ShockPulse,
    index: usize,
    len: usize,
}

impl Iterator for PulseSamples {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let i = self.index;
        self.index += 1;
        Some((i as f64 * self.pulse.time_step, self.pulse.acceleration_at(i)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PulseSamples {}

impl FusedIterator for PulseSamples {}

/// A sampled base-acceleration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseRecord {
    /// Sample times (s).
    pub time: Vec<f64>,
    /// Base acceleration at each sample.
    pub acceleration: Vec<f64>,
}

impl PulseRecord {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Largest absolute acceleration.
    pub fn peak(&self) -> f64 {
        self.acceleration.iter().fold(0.0_f64, |m, a| m.max(a.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse(kind: PulseKind, n: usize) -> ShockPulse {
        // D = 1 s sampled at D/n
        ShockPulse::new(kind, 1.0, 2.0, 1.0 / n as f64).unwrap()
    }

    #[test]
    fn test_record_layout() {
        let p = ShockPulse::new(PulseKind::HalfSine, 0.011, 100.0, 0.0005).unwrap();

        // 0.011 / 0.0005 = 22 exactly, though the float quotient is not
        assert_eq!(p.pulse_samples(), 22);
        assert_eq!(p.record_len(), 220);

        let record = p.generate();
        assert_eq!(record.len(), 220);
        assert_eq!(record.time.len(), record.acceleration.len());
        assert!(record.acceleration[22..].iter().all(|&a| a == 0.0));
        assert!((record.time[219] - 219.0 * 0.0005).abs() < 1e-15);
    }

    #[test]
    fn test_samples_restartable() {
        let p = pulse(PulseKind::VersedSine, 40);
        let mut first = p.samples();
        assert_eq!(first.len(), 400);

        first.next();
        let resumed = first.clone();
        assert_eq!(resumed.len(), 399);

        let a: Vec<_> = p.samples().collect();
        let b: Vec<_> = p.samples().collect();
        assert_eq!(a, b);
        assert_eq!(a[1..], resumed.collect::<Vec<_>>()[..]);
    }

    #[test]
    fn test_half_sine_shape() {
        let p = pulse(PulseKind::HalfSine, 100);
        assert_eq!(p.acceleration_at(0), 0.0);
        assert!((p.acceleration_at(50) - 2.0).abs() < 1e-12);
        assert!((p.acceleration_at(25) - 2.0 * (PI / 4.0).sin()).abs() < 1e-12);
        assert_eq!(p.acceleration_at(100), 0.0);
    }

    #[test]
    fn test_triangular_apex() {
        let p = pulse(PulseKind::Triangular, 10);
        let values: Vec<f64> = (0..10).map(|i| p.acceleration_at(i)).collect();

        assert!((values[4] - 1.6).abs() < 1e-12);
        assert!((values[5] - 2.0).abs() < 1e-12);
        assert!((values[9] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_triangular_odd_sample_count_stays_below_amplitude() {
        let p = pulse(PulseKind::Triangular, 11);
        let values: Vec<f64> = (0..11).map(|i| p.acceleration_at(i)).collect();

        let peak = values.iter().fold(0.0_f64, |m, v| m.max(*v));
        assert!(peak <= 2.0, "triangular peak {} exceeds amplitude 2.0", peak);
        // Samples 5 and 6 straddle the apex at τ = 0.5 symmetrically
        assert!((values[5] - values[6]).abs() < 1e-12, "{:?}", values);
        assert!((values[5] - 20.0 / 11.0).abs() < 1e-12, "{:?}", values);
        for i in 1..11 {
            assert!(
                (values[i] - values[11 - i]).abs() < 1e-12,
                "asymmetric at {}: {:?}",
                i,
                values
            );
        }
    }

    #[test]
    fn test_trapezoid_segments() {
        let p = pulse(PulseKind::Trapezoidal, 8);
        let values: Vec<f64> = (0..8).map(|i| p.acceleration_at(i)).collect();
        // rise 2, hold 4, fall 2
        let expected = [0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 1.0];
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-12, "{:?}", values);
        }

        // rise 2, hold 5, fall over the last 4 samples
        let p = pulse(PulseKind::Trapezoidal, 11);
        let values: Vec<f64> = (0..11).map(|i| p.acceleration_at(i)).collect();
        let expected = [0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 1.5, 1.0, 0.5];
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-12, "{:?}", values);
        }
    }

    #[test]
    fn test_sawtooth_and_rectangular() {
        let initial = pulse(PulseKind::InitialPeakSawtooth, 4);
        let terminal = pulse(PulseKind::TerminalPeakSawtooth, 4);
        let rect = pulse(PulseKind::Rectangular, 4);

        assert_eq!(initial.acceleration_at(0), 2.0);
        assert!((initial.acceleration_at(3) - 0.5).abs() < 1e-12);
        assert_eq!(terminal.acceleration_at(0), 0.0);
        assert!((terminal.acceleration_at(3) - 1.5).abs() < 1e-12);
        assert!((0..4).all(|i| rect.acceleration_at(i) == 2.0));
        assert_eq!(rect.acceleration_at(4), 0.0);
    }

    #[test]
    fn test_invalid_pulses() {
        assert!(ShockPulse::new(PulseKind::HalfSine, 0.0, 1.0, 1e-4).is_err());
        assert!(ShockPulse::new(PulseKind::HalfSine, 0.01, 1.0, 0.0).is_err());
        assert!(ShockPulse::new(PulseKind::HalfSine, 0.01, 1.0, 0.02).is_err());
        assert!(ShockPulse::new(PulseKind::HalfSine, 0.01, f64::NAN, 1e-4).is_err());
    }

    #[test]
    fn test_kind_parsing() {
        for kind in PulseKind::ALL {
            assert_eq!(kind.name().parse::<PulseKind>().unwrap(), kind);
        }
        assert_eq!("Half-Sine".parse::<PulseKind>().unwrap(), PulseKind::HalfSine);
        assert!("square".parse::<PulseKind>().is_err());
    }
}
