//! Analyses of a single-degree-of-freedom oscillator.
//!
//! This crate provides:
//! - Complex transfer functions (receptance, mobility, accelerance)
//! - Force and base-motion transmissibility
//! - Closed-form time responses for each damping regime

pub mod frequency;
pub mod time_response;
pub mod transmissibility;

pub use frequency::{
    FrfPoint, FrfResult, NormalizedResponse, OutputKind, half_power_bandwidth, normalized_transfer,
    receptance, resonance_amplitude, resonance_frequency_ratio, transfer_function,
};
pub use time_response::{
    HarmonicResponse, TimeExcitation, TimeResponse, decay_envelope, free_vibration,
    harmonic_response, impulse_response, logarithmic_decrement, logarithmic_decrement_from_ratio,
    oscillation_amplitude, solve_time_response, steady_state_amplitude, step_response,
};
pub use transmissibility::{
    TransmissibilityCurve, crossover_ratio, isolation_efficiency, isolation_start_frequency,
    peak_transmissibility, peak_transmissibility_ratio, transmissibility, transmissibility_at,
    transmissibility_multi_zeta, transmissibility_normalized,
};
