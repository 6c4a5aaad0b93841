//! Error types for sdof-core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid range: maximum {max} must be greater than minimum {min}")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid point count {count}: expected between {min} and {max}")]
    InvalidPointCount { count: usize, min: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
