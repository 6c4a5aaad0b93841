//! Frequency response and transmissibility.

use anyhow::{Context, Result};
use sdof::{
    FrequencyUnit, Oscillator, OutputKind, SweepParams, crossover_ratio, format_value,
    generate_frequencies, half_power_bandwidth, isolation_efficiency, isolation_start_frequency,
    resonance_amplitude, transfer_function, transmissibility, transmissibility_multi_zeta,
    validate_frequency_range,
};
use serde::Serialize;

use crate::output::{print_header, print_json, print_title};

#[derive(Serialize)]
struct FrfReport<'a> {
    system: &'a Oscillator,
    output: OutputKind,
    frequency_hz: Vec<f64>,
    magnitude_db: Vec<f64>,
    phase_deg: Vec<f64>,
    resonance_amplitude: f64,
    half_power_bandwidth: f64,
}

#[derive(Serialize)]
struct TransmissibilityReport<'a> {
    system: &'a Oscillator,
    frequency_hz: &'a [f64],
    curves: Vec<sdof::TransmissibilityCurve>,
    crossover_ratio: f64,
    isolation_start_hz: f64,
}

/// Generate the sweep, then bound the total point count it produced.
fn frequency_sweep(sweep: &SweepParams) -> Result<Vec<f64>> {
    let freqs = generate_frequencies(sweep).context("invalid frequency sweep")?;
    validate_frequency_range(sweep.fstart, sweep.fstop, freqs.len())
        .context("invalid frequency sweep")?;
    Ok(freqs)
}

/// Run a frequency response analysis.
pub fn run_frf(
    system: &Oscillator,
    sweep: &SweepParams,
    output: OutputKind,
    json: bool,
) -> Result<()> {
    let freqs = frequency_sweep(sweep)?;
    log::info!("FRF of {} system at {} frequencies", system.regime(), freqs.len());

    let result = transfer_function(system, &freqs, FrequencyUnit::Hertz, output);
    let zeta = system.damping_ratio();

    if json {
        return print_json(&FrfReport {
            system,
            output,
            frequency_hz: result.frequencies(),
            magnitude_db: result.magnitude_db(),
            phase_deg: result.phase_deg(),
            resonance_amplitude: resonance_amplitude(zeta),
            half_power_bandwidth: half_power_bandwidth(system),
        });
    }

    println!("{}", system);
    println!();
    print_title(&format!(
        "Frequency Response ({:?}, {} to {} Hz)",
        output, sweep.fstart, sweep.fstop
    ));

    print_header(&["Freq(Hz)", "Mag(dB)", "Phase(deg)"]);
    for ((f, db), phase) in freqs
        .iter()
        .zip(result.magnitude_db())
        .zip(result.phase_deg())
    {
        println!("{:>14.4e}{:>14.4}{:>14.4}", f, db, phase);
    }

    println!();
    println!("Resonance amplification: {:.4}", resonance_amplitude(zeta));
    println!(
        "Half-power bandwidth:    {} rad/s",
        format_value(half_power_bandwidth(system))
    );
    Ok(())
}

/// Run a transmissibility analysis, optionally for several damping ratios.
pub fn run_transmissibility(
    system: &Oscillator,
    sweep: &SweepParams,
    zeta_list: &[f64],
    json: bool,
) -> Result<()> {
    let freqs = frequency_sweep(sweep)?;

    let curves = if zeta_list.is_empty() {
        vec![transmissibility(system, &freqs, FrequencyUnit::Hertz)]
    } else {
        let fn_hz = system.natural_frequency_hz();
        let ratios: Vec<f64> = freqs.iter().map(|f| f / fn_hz).collect();
        transmissibility_multi_zeta(zeta_list, &ratios)
    };
    log::info!(
        "transmissibility: {} curve(s) at {} frequencies",
        curves.len(),
        freqs.len()
    );

    if json {
        return print_json(&TransmissibilityReport {
            system,
            frequency_hz: &freqs,
            curves,
            crossover_ratio: crossover_ratio(),
            isolation_start_hz: isolation_start_frequency(system),
        });
    }

    println!("{}", system);
    println!();
    print_title(&format!(
        "Transmissibility ({} to {} Hz)",
        sweep.fstart, sweep.fstop
    ));

    if let [curve] = curves.as_slice() {
        print_header(&["Freq(Hz)", "r", "TR", "Isolation(%)"]);
        for ((f, r), tr) in freqs.iter().zip(&curve.ratios).zip(&curve.values) {
            println!(
                "{:>14.4e}{:>14.4}{:>14.4}{:>14.2}",
                f,
                r,
                tr,
                isolation_efficiency(*tr)
            );
        }
    } else {
        let labels: Vec<String> = curves
            .iter()
            .map(|c| format!("TR(ζ={})", c.damping_ratio))
            .collect();
        let mut columns = vec!["Freq(Hz)", "r"];
        columns.extend(labels.iter().map(String::as_str));
        print_header(&columns);

        for (i, f) in freqs.iter().enumerate() {
            print!("{:>14.4e}{:>14.4}", f, curves[0].ratios[i]);
            for curve in &curves {
                print!("{:>14.4}", curve.values[i]);
            }
            println!();
        }
    }

    println!();
    println!("Crossover ratio:      {:.6}", crossover_ratio());
    println!(
        "Isolation starts at:  {} Hz",
        format_value(isolation_start_frequency(system))
    );
    Ok(())
}
