//! Shock response spectrum.

use anyhow::{Context, Result};
use sdof::{
    PulseKind, SrsConfig, SrsResult, SweepParams, compute_srs_from_pulse, generate_frequencies,
    validate_frequency_range,
};
use serde::Serialize;

use crate::output::{print_header, print_json, print_title};

#[derive(Serialize)]
struct SrsReport<'a> {
    pulse: PulseKind,
    duration: f64,
    amplitude: f64,
    spectrum: &'a SrsResult,
}

/// Run a shock response spectrum analysis of a standard pulse.
#[allow(clippy::too_many_arguments)]
pub fn run_srs(
    pulse: PulseKind,
    duration: f64,
    amplitude: f64,
    fmin: f64,
    fmax: f64,
    points: usize,
    zeta: f64,
    json: bool,
) -> Result<()> {
    validate_frequency_range(fmin, fmax, points).context("invalid frequency sweep")?;
    let freqs = generate_frequencies(&SweepParams::logarithmic(fmin, fmax, points))?;

    let config = SrsConfig::default().with_damping_ratio(zeta);
    let result = compute_srs_from_pulse(pulse, duration, amplitude, &freqs, &config)
        .with_context(|| format!("SRS of {} pulse failed", pulse))?;
    log::info!(
        "SRS of {} pulse: {} frequencies, dt = {:.3e} s",
        pulse,
        result.len(),
        result.time_step
    );

    if json {
        return print_json(&SrsReport {
            pulse,
            duration,
            amplitude,
            spectrum: &result,
        });
    }

    print_title(&format!(
        "Shock Response Spectrum ({}, {} s, peak {}, ζ = {})",
        pulse, duration, amplitude, zeta
    ));

    print_header(&[
        "Freq(Hz)",
        "Maxi-max",
        "Primary+",
        "Primary-",
        "Residual+",
        "Residual-",
    ]);
    for p in result.iter() {
        println!(
            "{:>14.4e}{:>14.4}{:>14.4}{:>14.4}{:>14.4}{:>14.4}",
            p.frequency, p.maxi_max, p.primary_pos, p.primary_neg, p.residual_pos, p.residual_neg
        );
    }

    println!();
    println!(
        "SRS analysis complete ({} frequencies, shock ends at t = {:.6} s).",
        result.len(),
        result.shock_end_index as f64 * result.time_step
    );
    Ok(())
}
