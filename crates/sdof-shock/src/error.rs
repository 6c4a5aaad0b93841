//! Error types for sdof-shock.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sdof_core::Error),

    #[error("invalid shock pulse: {0}")]
    InvalidPulse(String),

    #[error("base acceleration record is empty")]
    EmptyRecord,

    #[error("no spectral frequencies requested")]
    EmptySpectrum,

    #[error("invalid spectral frequency {0} Hz: must be positive and finite")]
    InvalidFrequency(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
