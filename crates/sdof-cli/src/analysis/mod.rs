//! Analysis runners for frequency, time and shock analyses.

pub mod frequency;
pub mod shock;
pub mod time;

pub use frequency::{run_frf, run_transmissibility};
pub use shock::run_srs;
pub use time::run_time;
