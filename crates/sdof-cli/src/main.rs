//! sdof command-line interface.

mod analysis;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sdof::{Oscillator, OutputKind, PulseKind, SweepParams, SweepType, TimeExcitation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "sdof")]
#[command(about = "Vibration analysis of a single-degree-of-freedom oscillator", long_about = None)]
#[command(version)]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Frequency response function over a logarithmic sweep
    Frf {
        #[command(flatten)]
        system: SystemArgs,
        #[command(flatten)]
        sweep: SweepArgs,
        /// Response quantity
        #[arg(long, value_enum, default_value_t = OutputArg::Displacement)]
        output: OutputArg,
    },

    /// Transmissibility over a logarithmic sweep
    Transmissibility {
        #[command(flatten)]
        system: SystemArgs,
        #[command(flatten)]
        sweep: SweepArgs,
        /// Compare several damping ratios instead of the system's own
        #[arg(long, value_delimiter = ',')]
        zeta_list: Vec<f64>,
    },

    /// Closed-form time response
    Time {
        #[command(flatten)]
        system: SystemArgs,
        /// Excitation kind
        #[arg(long, value_enum, default_value_t = TimeKind::Step)]
        kind: TimeKind,
        /// Duration (s)
        #[arg(long, default_value_t = 5.0)]
        duration: f64,
        /// Number of time samples
        #[arg(long, default_value_t = 1000)]
        points: usize,
        /// Force magnitude for step and harmonic excitation (N)
        #[arg(long, default_value_t = 1.0)]
        force: f64,
        /// Harmonic excitation frequency (Hz)
        #[arg(long, default_value_t = 1.5)]
        frequency: f64,
        /// Steady-state harmonic response only
        #[arg(long)]
        no_transient: bool,
        /// Initial displacement for free vibration (m)
        #[arg(long, default_value_t = 1.0)]
        x0: f64,
        /// Initial velocity for free vibration (m/s)
        #[arg(long, default_value_t = 0.0)]
        v0: f64,
        /// Initial amplitude of the decay envelope
        #[arg(long, default_value_t = 1.0)]
        amplitude: f64,
    },

    /// Shock response spectrum of a standard pulse
    Srs {
        /// Pulse shape
        #[arg(long, value_enum, default_value_t = PulseArg::HalfSine)]
        pulse: PulseArg,
        /// Pulse duration (s)
        #[arg(long, default_value_t = 0.011)]
        duration: f64,
        /// Pulse peak acceleration
        #[arg(long, default_value_t = 100.0)]
        amplitude: f64,
        /// Lowest natural frequency (Hz)
        #[arg(long, default_value_t = 10.0)]
        fmin: f64,
        /// Highest natural frequency (Hz)
        #[arg(long, default_value_t = 10_000.0)]
        fmax: f64,
        /// Number of natural frequencies
        #[arg(long, default_value_t = 100)]
        points: usize,
        /// Damping ratio of every oscillator
        #[arg(long, default_value_t = 0.05)]
        zeta: f64,
    },
}

/// Oscillator parameters shared by the single-system commands.
#[derive(Args, Debug, Clone)]
struct SystemArgs {
    /// Mass (kg)
    #[arg(long, default_value_t = 10.0)]
    mass: f64,
    /// Stiffness (N/m)
    #[arg(long, default_value_t = 1000.0)]
    stiffness: f64,
    /// Viscous damping coefficient (N·s/m) [default: 20]
    #[arg(long, conflicts_with = "zeta")]
    damping: Option<f64>,
    /// Damping ratio, instead of a damping coefficient
    #[arg(long)]
    zeta: Option<f64>,
}

const DEFAULT_DAMPING: f64 = 20.0;

impl SystemArgs {
    fn oscillator(&self) -> Result<Oscillator> {
        let osc = match (self.damping, self.zeta) {
            (_, Some(zeta)) => Oscillator::from_damping_ratio(self.mass, self.stiffness, zeta),
            (damping, None) => Oscillator::new(
                self.mass,
                self.stiffness,
                damping.unwrap_or(DEFAULT_DAMPING),
            ),
        };
        osc.context("invalid oscillator parameters")
    }
}

/// Frequency sweep bounds (Hz).
#[derive(Args, Debug, Clone)]
struct SweepArgs {
    /// Start frequency (Hz)
    #[arg(long, default_value_t = 0.1)]
    fmin: f64,
    /// Stop frequency (Hz)
    #[arg(long, default_value_t = 100.0)]
    fmax: f64,
    /// Number of frequency points (per decade or octave for those spacings)
    #[arg(long, default_value_t = 1000)]
    points: usize,
    /// Point spacing
    #[arg(long, value_enum, default_value_t = SpacingArg::Log)]
    spacing: SpacingArg,
}

impl SweepArgs {
    fn params(&self) -> SweepParams {
        SweepParams::logarithmic(self.fmin, self.fmax, self.points)
            .with_sweep_type(self.spacing.into())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SpacingArg {
    Log,
    Linear,
    Decade,
    Octave,
}

impl From<SpacingArg> for SweepType {
    fn from(arg: SpacingArg) -> Self {
        match arg {
            SpacingArg::Log => SweepType::Logarithmic,
            SpacingArg::Linear => SweepType::Linear,
            SpacingArg::Decade => SweepType::Decade,
            SpacingArg::Octave => SweepType::Octave,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputArg {
    Displacement,
    Velocity,
    Acceleration,
}

impl From<OutputArg> for OutputKind {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Displacement => OutputKind::Displacement,
            OutputArg::Velocity => OutputKind::Velocity,
            OutputArg::Acceleration => OutputKind::Acceleration,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum TimeKind {
    Impulse,
    Step,
    Harmonic,
    Free,
    Envelope,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PulseArg {
    HalfSine,
    Triangular,
    Rectangular,
    VersedSine,
    Trapezoidal,
    InitialPeakSawtooth,
    TerminalPeakSawtooth,
}

impl From<PulseArg> for PulseKind {
    fn from(arg: PulseArg) -> Self {
        match arg {
            PulseArg::HalfSine => PulseKind::HalfSine,
            PulseArg::Triangular => PulseKind::Triangular,
            PulseArg::Rectangular => PulseKind::Rectangular,
            PulseArg::VersedSine => PulseKind::VersedSine,
            PulseArg::Trapezoidal => PulseKind::Trapezoidal,
            PulseArg::InitialPeakSawtooth => PulseKind::InitialPeakSawtooth,
            PulseArg::TerminalPeakSawtooth => PulseKind::TerminalPeakSawtooth,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter_layer = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Logs go to stderr so that --json output stays parseable
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Frf {
            system,
            sweep,
            output,
        } => {
            let osc = system.oscillator()?;
            analysis::run_frf(&osc, &sweep.params(), (*output).into(), cli.json)
        }
        Command::Transmissibility {
            system,
            sweep,
            zeta_list,
        } => {
            let osc = system.oscillator()?;
            analysis::run_transmissibility(&osc, &sweep.params(), zeta_list, cli.json)
        }
        Command::Time {
            system,
            kind,
            duration,
            points,
            force,
            frequency,
            no_transient,
            x0,
            v0,
            amplitude,
        } => {
            let osc = system.oscillator()?;
            let excitation = match kind {
                TimeKind::Impulse => TimeExcitation::Impulse,
                TimeKind::Step => TimeExcitation::Step { force: *force },
                TimeKind::Harmonic => TimeExcitation::Harmonic {
                    frequency_hz: *frequency,
                    force: *force,
                    include_transient: !*no_transient,
                },
                TimeKind::Free => TimeExcitation::Free { x0: *x0, v0: *v0 },
                TimeKind::Envelope => TimeExcitation::Envelope {
                    amplitude: *amplitude,
                },
            };
            analysis::run_time(&osc, &excitation, *duration, *points, cli.json)
        }
        Command::Srs {
            pulse,
            duration,
            amplitude,
            fmin,
            fmax,
            points,
            zeta,
        } => analysis::run_srs(
            (*pulse).into(),
            *duration,
            *amplitude,
            *fmin,
            *fmax,
            *points,
            *zeta,
            cli.json,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_system() {
        let cli = Cli::try_parse_from(["sdof", "frf"]).unwrap();
        let Command::Frf { system, sweep, output } = cli.command else {
            panic!("expected frf");
        };
        let osc = system.oscillator().unwrap();

        assert!((osc.natural_frequency() - 10.0).abs() < 1e-12);
        assert!((osc.damping_ratio() - 0.1).abs() < 1e-12);
        assert_eq!(sweep.points, 1000);
        assert_eq!(output, OutputArg::Displacement);
    }

    #[test]
    fn test_zeta_and_damping_conflict() {
        assert!(Cli::try_parse_from(["sdof", "time", "--zeta", "0.2", "--damping", "3"]).is_err());

        let cli = Cli::try_parse_from(["sdof", "--json", "time", "--zeta", "2", "--kind", "free"])
            .unwrap();
        assert!(cli.json);
        let Command::Time { system, kind, .. } = cli.command else {
            panic!("expected time");
        };
        assert_eq!(kind, TimeKind::Free);
        assert!(system.oscillator().unwrap().is_overdamped());
    }

    #[test]
    fn test_srs_arguments() {
        let cli = Cli::try_parse_from([
            "sdof",
            "srs",
            "--pulse",
            "terminal-peak-sawtooth",
            "--zeta-list",
            "0.1",
        ]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["sdof", "srs", "--pulse", "versed-sine"]).unwrap();
        let Command::Srs { pulse, fmax, .. } = cli.command else {
            panic!("expected srs");
        };
        assert_eq!(PulseKind::from(pulse), PulseKind::VersedSine);
        assert_eq!(fmax, 10_000.0);
    }

    #[test]
    fn test_sweep_spacing() {
        let cli = Cli::try_parse_from(["sdof", "frf", "--spacing", "octave", "--points", "12"])
            .unwrap();
        let Command::Frf { sweep, .. } = cli.command else {
            panic!("expected frf");
        };
        let params = sweep.params();
        assert_eq!(params.sweep_type, SweepType::Octave);
        assert_eq!(params.num_points, 12);

        let cli = Cli::try_parse_from(["sdof", "transmissibility"]).unwrap();
        let Command::Transmissibility { sweep, .. } = cli.command else {
            panic!("expected transmissibility");
        };
        assert_eq!(sweep.params().sweep_type, SweepType::Logarithmic);
    }

    #[test]
    fn test_zeta_list_parsing() {
        let args = ["sdof", "transmissibility", "--zeta-list", "0.05,0.2,0.5"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Transmissibility { zeta_list, .. } = cli.command else {
            panic!("expected transmissibility");
        };
        assert_eq!(zeta_list, vec![0.05, 0.2, 0.5]);
    }

    #[test]
    fn test_invalid_mass_is_reported() {
        let cli = Cli::try_parse_from(["sdof", "frf", "--mass", "0"]).unwrap();
        let Command::Frf { system, .. } = cli.command else {
            panic!("expected frf");
        };
        assert!(system.oscillator().is_err());
    }
}
