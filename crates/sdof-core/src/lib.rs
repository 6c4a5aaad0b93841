//! Core oscillator model for sdof.
//!
//! This crate provides the data structures every analysis consumes:
//! - The [`Oscillator`] value object (mass, stiffness, damping) and its
//!   derived properties
//! - The [`DampingRegime`] tag used to select closed-form solutions
//! - Frequency units, sweep grids and time grids

pub mod error;
pub mod oscillator;
pub mod sweep;
pub mod units;

pub use error::{Error, Result};
pub use oscillator::{CRITICAL_TOLERANCE, DampingRegime, Oscillator};
pub use sweep::{
    MAX_SWEEP_POINTS, MIN_SWEEP_POINTS, SweepParams, SweepType, generate_frequencies, time_grid,
    validate_frequency_range,
};
pub use units::{FrequencyUnit, format_value};
