//! Closed-form time response.

use anyhow::{Context, Result};
use sdof::{
    DampingRegime, Oscillator, TimeExcitation, format_value, logarithmic_decrement,
    solve_time_response, time_grid,
};
use serde::Serialize;

use crate::output::{print_header, print_json, print_title};

#[derive(Serialize)]
struct TimeReport<'a> {
    system: &'a Oscillator,
    excitation: &'a TimeExcitation,
    time: &'a [f64],
    displacement: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    steady_state: Option<&'a [f64]>,
}

/// Run a time-domain analysis over `[0, duration]`.
pub fn run_time(
    system: &Oscillator,
    excitation: &TimeExcitation,
    duration: f64,
    points: usize,
    json: bool,
) -> Result<()> {
    let time = time_grid(duration, points).context("invalid time grid")?;
    log::info!(
        "{} response of {} system over {} s",
        excitation.name(),
        system.regime(),
        duration
    );

    let response = solve_time_response(system, &time, excitation);

    if json {
        return print_json(&TimeReport {
            system,
            excitation,
            time: &time,
            displacement: &response.displacement,
            steady_state: response.steady_state.as_deref(),
        });
    }

    println!("{}", system);
    println!();
    print_title(&format!(
        "Time Response ({}, {} s, {} points)",
        excitation.name(),
        duration,
        points
    ));

    match &response.steady_state {
        Some(steady) => {
            print_header(&["Time(s)", "x(m)", "x_ss(m)"]);
            for ((t, x), xs) in time.iter().zip(&response.displacement).zip(steady) {
                println!("{:>14.6}{:>14.6e}{:>14.6e}", t, x, xs);
            }
        }
        None => {
            print_header(&["Time(s)", "x(m)"]);
            for (t, x) in time.iter().zip(&response.displacement) {
                println!("{:>14.6}{:>14.6e}", t, x);
            }
        }
    }

    let peak = response
        .displacement
        .iter()
        .fold(0.0_f64, |m, x| m.max(x.abs()));
    println!();
    println!("Peak |x|: {} m", format_value(peak));
    if system.regime() == DampingRegime::Underdamped {
        println!("Logarithmic decrement: {:.4}", logarithmic_decrement(system));
    }
    Ok(())
}
