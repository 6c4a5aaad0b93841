//! Shock response spectra for sdof.
//!
//! This crate provides:
//! - Standard shock pulses sampled as base-acceleration records
//! - A Newmark-β integrator for a base-excited oscillator
//! - Shock response spectrum extraction with a rayon-parallel frequency sweep

pub mod error;
pub mod integrator;
pub mod pulse;
pub mod srs;

pub use error::{Error, Result};
pub use integrator::{NewmarkIntegrator, NewmarkParams, NewmarkState, integrate_base_excitation};
pub use pulse::{PulseKind, PulseRecord, PulseSamples, RECORD_DURATIONS, ShockPulse};
pub use srs::{
    ParallelSweepConfig, SAMPLES_PER_CYCLE, SHOCK_END_THRESHOLD, SrsConfig, SrsPoint, SrsResult,
    auto_time_step, compute_srs, compute_srs_from_pulse, shock_end_index,
};
