//! Shock response spectrum.
//!
//! For every requested natural frequency an oscillator is integrated under
//! the same base-acceleration record and its pseudo-acceleration `ωn²·x(t)`
//! is reduced to five peak values. The base record is split at the
//! shock-end index into a primary part (during the shock) and a residual
//! part (after it).
//!
//! Frequencies are independent and are swept in parallel with rayon once
//! there are enough of them. Results are written by frequency index, so the
//! parallel and sequential sweeps produce identical output.

use rayon::prelude::*;
use sdof_core::Error as CoreError;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::integrator::NewmarkIntegrator;
use crate::pulse::{PulseKind, ShockPulse};

/// Fraction of the peak input that still counts as shock.
pub const SHOCK_END_THRESHOLD: f64 = 0.01;

/// Samples per cycle of the highest spectral frequency when the time step is
/// chosen automatically.
pub const SAMPLES_PER_CYCLE: f64 = 20.0;

/// Records longer than this are reported through `log::warn!`.
const LONG_RECORD: usize = 5_000_000;

/// Configuration for parallel spectrum sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelSweepConfig {
    /// Minimum frequencies to use parallel execution (below this, sequential is faster).
    pub min_points_for_parallel: usize,
    /// Frequencies per rayon task. None = auto (rayon default).
    pub chunk_size: Option<usize>,
}

impl Default for ParallelSweepConfig {
    fn default() -> Self {
        Self {
            min_points_for_parallel: 4,
            chunk_size: None,
        }
    }
}

impl ParallelSweepConfig {
    /// Never run in parallel.
    pub fn sequential() -> Self {
        Self {
            min_points_for_parallel: usize::MAX,
            chunk_size: None,
        }
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size.max(1));
        self
    }

    pub fn with_min_parallel(mut self, min: usize) -> Self {
        self.min_points_for_parallel = min;
        self
    }
}

/// Spectrum computation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrsConfig {
    /// Damping ratio shared by every oscillator of the spectrum.
    pub damping_ratio: f64,
    pub parallel: ParallelSweepConfig,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            damping_ratio: 0.05,
            parallel: ParallelSweepConfig::default(),
        }
    }
}

impl SrsConfig {
    pub fn with_damping_ratio(mut self, zeta: f64) -> Self {
        self.damping_ratio = zeta;
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelSweepConfig) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Spectrum values at one natural frequency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SrsPoint {
    /// Natural frequency (Hz).
    pub frequency: f64,
    /// Largest |ωn²·x| over the whole record.
    pub maxi_max: f64,
    /// Largest value during the shock.
    pub primary_pos: f64,
    /// Magnitude of the smallest value during the shock.
    pub primary_neg: f64,
    /// Largest value after the shock; zero when nothing follows it.
    pub residual_pos: f64,
    /// Magnitude of the smallest value after the shock; zero when nothing follows it.
    pub residual_neg: f64,
}

/// Shock response spectrum, one entry per requested frequency in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SrsResult {
    pub frequencies: Vec<f64>,
    pub maxi_max: Vec<f64>,
    pub primary_pos: Vec<f64>,
    pub primary_neg: Vec<f64>,
    pub residual_pos: Vec<f64>,
    pub residual_neg: Vec<f64>,
    /// Damping ratio of every oscillator.
    pub damping_ratio: f64,
    /// Time step of the base record (s).
    pub time_step: f64,
    /// Last sample index of the primary part.
    pub shock_end_index: usize,
}

impl SrsResult {
    fn from_points(
        points: Vec<SrsPoint>,
        damping_ratio: f64,
        time_step: f64,
        shock_end_index: usize,
    ) -> Self {
        let mut result = Self {
            frequencies: Vec::with_capacity(points.len()),
            maxi_max: Vec::with_capacity(points.len()),
            primary_pos: Vec::with_capacity(points.len()),
            primary_neg: Vec::with_capacity(points.len()),
            residual_pos: Vec::with_capacity(points.len()),
            residual_neg: Vec::with_capacity(points.len()),
            damping_ratio,
            time_step,
            shock_end_index,
        };
        for p in points {
            result.frequencies.push(p.frequency);
            result.maxi_max.push(p.maxi_max);
            result.primary_pos.push(p.primary_pos);
            result.primary_neg.push(p.primary_neg);
            result.residual_pos.push(p.residual_pos);
            result.residual_neg.push(p.residual_neg);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Values at index `i`.
    pub fn point(&self, i: usize) -> Option<SrsPoint> {
        Some(SrsPoint {
            frequency: *self.frequencies.get(i)?,
            maxi_max: self.maxi_max[i],
            primary_pos: self.primary_pos[i],
            primary_neg: self.primary_neg[i],
            residual_pos: self.residual_pos[i],
            residual_neg: self.residual_neg[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SrsPoint> + '_ {
        (0..self.len()).filter_map(|i| self.point(i))
    }
}

/// Last sample whose magnitude exceeds 1% of the record's peak magnitude.
///
/// The scan runs backward over the input, not the response. A record with
/// no such sample (all zeros) ends at its last index; an empty record at 0.
pub fn shock_end_index(base: &[f64]) -> usize {
    let peak = base.iter().fold(0.0_f64, |m, a| m.max(a.abs()));
    let threshold = SHOCK_END_THRESHOLD * peak;
    base.iter()
        .rposition(|a| a.abs() > threshold)
        .unwrap_or(base.len().saturating_sub(1))
}

/// Running maximum and minimum of a segment.
#[derive(Clone, Copy)]
struct Extremes {
    max: f64,
    min: f64,
    seen: bool,
}

impl Extremes {
    const EMPTY: Self = Self {
        max: f64::NEG_INFINITY,
        min: f64::INFINITY,
        seen: false,
    };

    #[inline]
    fn push(&mut self, value: f64) {
        self.max = self.max.max(value);
        self.min = self.min.min(value);
        self.seen = true;
    }

    /// `(max, |min|)`, or zeros for an empty segment.
    fn peaks(self) -> (f64, f64) {
        if self.seen {
            (self.max, self.min.abs())
        } else {
            (0.0, 0.0)
        }
    }
}

/// Integrate one oscillator and reduce its pseudo-acceleration.
fn spectrum_point(
    frequency: f64,
    zeta: f64,
    base: &[f64],
    dt: f64,
    shock_end: usize,
) -> Result<SrsPoint> {
    let (&base0, rest) = base.split_first().ok_or(Error::EmptyRecord)?;
    let mut integrator = NewmarkIntegrator::new(frequency, zeta, dt)?
        .with_initial_conditions(0.0, 0.0, base0);
    let wn2 = integrator.natural_frequency().powi(2);

    let mut primary = Extremes::EMPTY;
    let mut residual = Extremes::EMPTY;
    let mut maxi_max = 0.0_f64;

    // Sample 0: the oscillator starts at rest
    primary.push(0.0);

    // rest[i] is sample i + 1
    for (i, &b) in rest.iter().enumerate() {
        let response = wn2 * integrator.step(b);
        if i < shock_end {
            primary.push(response);
        } else {
            residual.push(response);
        }
        maxi_max = maxi_max.max(response.abs());
    }

    let (primary_pos, primary_neg) = primary.peaks();
    let (residual_pos, residual_neg) = residual.peaks();

    Ok(SrsPoint {
        frequency,
        maxi_max,
        primary_pos,
        primary_neg,
        residual_pos,
        residual_neg,
    })
}

fn check_frequencies(frequencies: &[f64]) -> Result<()> {
    match frequencies
        .iter()
        .find(|f| !(f.is_finite() && **f > 0.0))
    {
        Some(&bad) => Err(Error::InvalidFrequency(bad)),
        None => Ok(()),
    }
}

/// Compute the shock response spectrum of a base-acceleration record
/// sampled every `dt` seconds, at natural frequencies `frequencies` (Hz).
///
/// An empty frequency list yields an empty spectrum.
pub fn compute_srs(
    base: &[f64],
    dt: f64,
    frequencies: &[f64],
    config: &SrsConfig,
) -> Result<SrsResult> {
    if base.is_empty() {
        return Err(Error::EmptyRecord);
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(CoreError::InvalidParameter {
            name: "time_step",
            value: dt,
        }
        .into());
    }
    let zeta = config.damping_ratio;
    if !(zeta.is_finite() && zeta >= 0.0) {
        return Err(CoreError::InvalidParameter {
            name: "damping_ratio",
            value: zeta,
        }
        .into());
    }
    check_frequencies(frequencies)?;

    let shock_end = shock_end_index(base);
    let total = frequencies.len();
    let parallel = &config.parallel;
    let use_parallel =
        total >= parallel.min_points_for_parallel && rayon::current_num_threads() > 1;

    log::debug!(
        "SRS: {} frequencies, {} samples, shock ends at sample {}, ζ = {}",
        total,
        base.len(),
        shock_end,
        zeta
    );

    let points: Vec<SrsPoint> = if !use_parallel {
        frequencies
            .iter()
            .map(|&f| spectrum_point(f, zeta, base, dt, shock_end))
            .collect::<Result<_>>()?
    } else if let Some(chunk_size) = parallel.chunk_size {
        log::debug!(
            "SRS: parallel sweep on {} threads, chunks of {}",
            rayon::current_num_threads(),
            chunk_size
        );
        frequencies
            .par_chunks(chunk_size)
            .flat_map_iter(|chunk| {
                chunk
                    .iter()
                    .map(|&f| spectrum_point(f, zeta, base, dt, shock_end))
            })
            .collect::<Result<_>>()?
    } else {
        log::debug!(
            "SRS: parallel sweep on {} threads",
            rayon::current_num_threads()
        );
        frequencies
            .par_iter()
            .map(|&f| spectrum_point(f, zeta, base, dt, shock_end))
            .collect::<Result<_>>()?
    };

    Ok(SrsResult::from_points(points, zeta, dt, shock_end))
}

/// Time step used by [`compute_srs_from_pulse`]: 20 samples per cycle of the
/// highest frequency, and at least 20 samples across the pulse.
///
/// The pulse cap only binds when `max_frequency < 1/duration`. In that case
/// the step is finer than `1/(20·max_frequency)` and the spectrum differs
/// slightly from one computed at the per-cycle step alone.
pub fn auto_time_step(duration: f64, max_frequency: f64) -> f64 {
    (1.0 / (SAMPLES_PER_CYCLE * max_frequency)).min(duration / SAMPLES_PER_CYCLE)
}

/// Generate a standard pulse and compute its shock response spectrum.
pub fn compute_srs_from_pulse(
    kind: PulseKind,
    duration: f64,
    amplitude: f64,
    frequencies: &[f64],
    config: &SrsConfig,
) -> Result<SrsResult> {
    if frequencies.is_empty() {
        return Err(Error::EmptySpectrum);
    }
    check_frequencies(frequencies)?;

    let max_frequency = frequencies.iter().cloned().fold(0.0_f64, f64::max);
    let dt = auto_time_step(duration, max_frequency);
    let pulse = ShockPulse::new(kind, duration, amplitude, dt)?;

    let len = pulse.record_len();
    if len > LONG_RECORD {
        log::warn!(
            "{} pulse of {} s at dt = {:.3e} s needs {} samples per oscillator",
            kind,
            duration,
            dt,
            len
        );
    }

    let record = pulse.generate();
    compute_srs(&record.acceleration, dt, frequencies, config)
}
