//! Frequency sweeps and time grids.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest point count accepted by [`validate_frequency_range`].
pub const MIN_SWEEP_POINTS: usize = 10;

/// Largest point count accepted by [`validate_frequency_range`].
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Frequency sweep spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepType {
    /// Linear spacing, `num_points` in total.
    Linear,
    /// Geometric spacing, `num_points` in total, both endpoints included.
    #[default]
    Logarithmic,
    /// Logarithmic spacing, `num_points` per decade.
    Decade,
    /// Logarithmic spacing, `num_points` per octave.
    Octave,
}

/// Frequency sweep request.
///
/// The unit of `fstart`/`fstop` is whatever the consumer of the generated
/// grid expects; it passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    /// Start frequency.
    pub fstart: f64,
    /// Stop frequency.
    pub fstop: f64,
    /// Number of points (total for Linear/Logarithmic, per decade/octave otherwise).
    pub num_points: usize,
    /// Sweep type.
    pub sweep_type: SweepType,
}

impl SweepParams {
    /// Create a logarithmic sweep with `num_points` in total.
    pub fn logarithmic(fstart: f64, fstop: f64, num_points: usize) -> Self {
        Self {
            fstart,
            fstop,
            num_points,
            sweep_type: SweepType::Logarithmic,
        }
    }

    /// Create a linear sweep with `num_points` in total.
    pub fn linear(fstart: f64, fstop: f64, num_points: usize) -> Self {
        Self {
            fstart,
            fstop,
            num_points,
            sweep_type: SweepType::Linear,
        }
    }

    /// Set the sweep type.
    pub fn with_sweep_type(mut self, sweep_type: SweepType) -> Self {
        self.sweep_type = sweep_type;
        self
    }
}

/// Generate the frequency points of a sweep, in ascending order.
///
/// Fails when `fstop <= fstart`, when no points are requested, or when a
/// logarithmic sweep starts at a non-positive frequency.
pub fn generate_frequencies(params: &SweepParams) -> Result<Vec<f64>> {
    if !params.fstart.is_finite() || !params.fstop.is_finite() || params.fstop <= params.fstart {
        return Err(Error::InvalidRange {
            min: params.fstart,
            max: params.fstop,
        });
    }
    if params.num_points == 0 {
        return Err(Error::InvalidPointCount {
            count: 0,
            min: 1,
            max: usize::MAX,
        });
    }
    if params.sweep_type != SweepType::Linear && params.fstart <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "fstart",
            value: params.fstart,
        });
    }

    let points = match params.sweep_type {
        SweepType::Linear => {
            if params.num_points == 1 {
                return Ok(vec![params.fstart]);
            }
            let step = (params.fstop - params.fstart) / (params.num_points as f64 - 1.0);
            (0..params.num_points)
                .map(|i| params.fstart + step * i as f64)
                .collect()
        }
        SweepType::Logarithmic => {
            if params.num_points == 1 {
                return Ok(vec![params.fstart]);
            }
            let log_start = params.fstart.log10();
            let log_span = params.fstop.log10() - log_start;
            let last = params.num_points - 1;
            (0..params.num_points)
                .map(|i| {
                    if i == last {
                        params.fstop
                    } else {
                        10.0_f64.powf(log_start + log_span * i as f64 / last as f64)
                    }
                })
                .collect()
        }
        SweepType::Decade => per_factor_grid(params, 10.0),
        SweepType::Octave => per_factor_grid(params, 2.0),
    };

    Ok(points)
}

/// `num_points` geometric steps per multiple of `factor`, from `fstart` up to
/// the last point not above `fstop`.
fn per_factor_grid(params: &SweepParams, factor: f64) -> Vec<f64> {
    let step = factor.ln() / params.num_points as f64;
    let span = (params.fstop / params.fstart).ln();
    // keep an endpoint that lands on fstop up to rounding
    let last = (span / step + 1e-9).floor() as usize;
    (0..=last)
        .map(|i| params.fstart * (step * i as f64).exp())
        .collect()
}

/// Check a user-facing frequency range request.
///
/// Both bounds must be positive, `fmax > fmin`, and the point count within
/// [`MIN_SWEEP_POINTS`]..=[`MAX_SWEEP_POINTS`].
pub fn validate_frequency_range(fmin: f64, fmax: f64, num_points: usize) -> Result<()> {
    if !fmin.is_finite() || fmin <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "minimum frequency",
            value: fmin,
        });
    }
    if !fmax.is_finite() || fmax <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "maximum frequency",
            value: fmax,
        });
    }
    if fmax <= fmin {
        return Err(Error::InvalidRange {
            min: fmin,
            max: fmax,
        });
    }
    if !(MIN_SWEEP_POINTS..=MAX_SWEEP_POINTS).contains(&num_points) {
        return Err(Error::InvalidPointCount {
            count: num_points,
            min: MIN_SWEEP_POINTS,
            max: MAX_SWEEP_POINTS,
        });
    }
    Ok(())
}

/// Evenly spaced time samples over `[0, duration]`, both ends included.
pub fn time_grid(duration: f64, num_points: usize) -> Result<Vec<f64>> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "duration",
            value: duration,
        });
    }
    if num_points < 2 {
        return Err(Error::InvalidPointCount {
            count: num_points,
            min: 2,
            max: usize::MAX,
        });
    }
    let step = duration / (num_points as f64 - 1.0);
    Ok((0..num_points)
        .map(|i| {
            if i == num_points - 1 {
                duration
            } else {
                step * i as f64
            }
        })
        .collect())
}
