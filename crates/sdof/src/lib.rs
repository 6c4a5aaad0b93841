//! # sdof
//!
//! Vibration analysis of a single-degree-of-freedom mass-spring-damper.
//!
//! sdof provides:
//! - The oscillator model and its damping-regime classification
//! - Frequency response functions and transmissibility
//! - Closed-form impulse, step, harmonic and free-vibration responses
//! - Shock response spectra of standard pulses or arbitrary base records
//!
//! ## Quick Start
//!
//! ```rust
//! use sdof::prelude::*;
//!
//! // 1 kg on a 10 kN/m spring with 5% damping
//! let osc = Oscillator::from_damping_ratio(1.0, 1.0e4, 0.05).unwrap();
//! assert_eq!(osc.regime(), DampingRegime::Underdamped);
//!
//! let freqs = generate_frequencies(&SweepParams::logarithmic(1.0, 100.0, 50)).unwrap();
//! let frf = transfer_function(&osc, &freqs, FrequencyUnit::Hertz, OutputKind::Displacement);
//! assert_eq!(frf.magnitude_db().len(), 50);
//! ```
//!
//! ## Shock Response Spectra
//!
//! ```rust
//! use sdof::prelude::*;
//!
//! let freqs = [10.0, 100.0, 1000.0];
//! let srs = compute_srs_from_pulse(PulseKind::HalfSine, 0.011, 100.0, &freqs, &SrsConfig::default())
//!     .unwrap();
//! for point in srs.iter() {
//!     assert!(point.maxi_max >= point.primary_pos);
//! }
//! ```

// Re-export member crates
pub use sdof_core as core;
pub use sdof_shock as shock;
pub use sdof_solver as solver;

// ============================================================================
// Convenient re-exports from sdof_core
// ============================================================================

pub use sdof_core::{
    CRITICAL_TOLERANCE,
    DampingRegime,
    // Errors
    Error as CoreError,
    FrequencyUnit,
    // Oscillator model
    Oscillator,
    SweepParams,
    SweepType,
    format_value,
    // Grids
    generate_frequencies,
    time_grid,
    validate_frequency_range,
};

// ============================================================================
// Convenient re-exports from sdof_solver
// ============================================================================

pub use sdof_solver::{
    FrfResult,
    HarmonicResponse,
    OutputKind,
    TimeExcitation,
    TimeResponse,
    TransmissibilityCurve,
    crossover_ratio,
    decay_envelope,
    free_vibration,
    half_power_bandwidth,
    harmonic_response,
    // Time response
    impulse_response,
    isolation_efficiency,
    isolation_start_frequency,
    logarithmic_decrement,
    normalized_transfer,
    resonance_amplitude,
    solve_time_response,
    step_response,
    // Frequency response
    transfer_function,
    // Transmissibility
    transmissibility,
    transmissibility_multi_zeta,
};

// ============================================================================
// Convenient re-exports from sdof_shock
// ============================================================================

pub use sdof_shock::{
    // Errors
    Error as ShockError,
    // Integration
    NewmarkIntegrator,
    NewmarkParams,
    ParallelSweepConfig,
    // Pulses
    PulseKind,
    ShockPulse,
    // Spectra
    SrsConfig,
    SrsPoint,
    SrsResult,
    compute_srs,
    compute_srs_from_pulse,
    integrate_base_excitation,
    shock_end_index,
};

/// Re-export of num_complex's Complex type.
pub use num_complex::Complex;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use sdof::prelude::*;
/// ```
pub mod prelude {
    // Oscillator model
    pub use crate::{DampingRegime, Oscillator};

    // Grids and units
    pub use crate::{FrequencyUnit, SweepParams, SweepType, generate_frequencies, time_grid};

    // Frequency response
    pub use crate::{FrfResult, OutputKind, transfer_function, transmissibility};

    // Time response
    pub use crate::{TimeExcitation, TimeResponse, solve_time_response};

    // Shock
    pub use crate::{
        PulseKind, ShockPulse, SrsConfig, SrsResult, compute_srs, compute_srs_from_pulse,
    };

    // Common external types
    pub use crate::Complex;
}
