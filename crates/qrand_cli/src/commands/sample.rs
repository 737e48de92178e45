//! Sample command implementation
//!
//! Draws points of one kind from a seeded or resumed sequencer.

use std::io::Write;
use std::str::FromStr;

use qrand_core::batch::{gaussian_batch, par_generate, uniform_batch};
use qrand_core::QRandSequencer;
use tracing::info;

use super::{restored_sequencer, seeded_sequencer};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{render, Samples};
use crate::{CliError, Result};

const REAL: &str = "a number";
const WHOLE: &str = "a whole number in i64 range";

/// Distribution to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Uniform reals in `[min, max)`, default `[0, 1)`
    Uniform,
    /// Uniform integers in `[min, max)`; both bounds required
    Integer,
    /// Standard normal vectors
    Gaussian,
}

impl FromStr for SampleKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(SampleKind::Uniform),
            "integer" | "int" => Ok(SampleKind::Integer),
            "gaussian" | "normal" => Ok(SampleKind::Gaussian),
            other => Err(CliError::invalid_argument(format!(
                "Unknown kind: {}. Supported: uniform, integer, gaussian",
                other
            ))),
        }
    }
}

/// Options shared by `sample` and `resume`.
#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Distribution to sample
    pub kind: SampleKind,
    /// Number of points
    pub points: usize,
    /// Lower bound as typed, parsed according to `kind`
    pub min: Option<String>,
    /// Upper bound as typed, parsed according to `kind`
    pub max: Option<String>,
    /// Emit the checkpoint after sampling
    pub print_state: bool,
}

/// Run the sample command
///
/// `dimension` and `seed` are the flags given on this command line; they
/// cannot be combined with `state_in`, which fixes both.
pub fn run(
    config: &CliConfig,
    options: &SampleOptions,
    state_in: Option<&str>,
    dimension: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let mut sequencer = source_sequencer(config, state_in, dimension, seed)?;
    let stdout = std::io::stdout();
    emit(&mut stdout.lock(), &mut sequencer, options, config.format)
}

/// Seeds a fresh sequencer or restores `state_in`.
pub(crate) fn source_sequencer(
    config: &CliConfig,
    state_in: Option<&str>,
    dimension: Option<usize>,
    seed: Option<u64>,
) -> Result<QRandSequencer> {
    match state_in {
        Some(state) => {
            if dimension.is_some() || seed.is_some() {
                return Err(CliError::invalid_argument(
                    "--state-in fixes dimension and seed; drop --dimension/--seed",
                ));
            }
            restored_sequencer(state)
        }
        None => seeded_sequencer(config),
    }
}

/// Draws the requested points and renders them to `out`.
pub(crate) fn emit<W: Write>(
    out: &mut W,
    sequencer: &mut QRandSequencer,
    options: &SampleOptions,
    format: OutputFormat,
) -> Result<()> {
    info!("Sampling {} {:?} points", options.points, options.kind);
    info!("  Dimension: {}", sequencer.dimensionality());
    info!("  Output format: {}", format);

    let samples = draw(sequencer, options)?;
    let state = options.print_state.then(|| sequencer.to_state_string());
    render(out, &samples, format, state.as_deref())?;

    info!(
        "Sampled {} points, sequence now at point {}",
        samples.len(),
        sequencer.count()
    );
    Ok(())
}

/// Draws `options.points` points of `options.kind`.
pub(crate) fn draw(sequencer: &mut QRandSequencer, options: &SampleOptions) -> Result<Samples> {
    let n = options.points;
    match options.kind {
        SampleKind::Uniform => {
            let min = bound(options.min.as_deref(), "--min", REAL)?.unwrap_or(0.0);
            let max = bound(options.max.as_deref(), "--max", REAL)?.unwrap_or(1.0);
            Ok(Samples::Real(uniform_batch(sequencer, n, min, max)?))
        }
        SampleKind::Integer => {
            let min = bound::<i64>(options.min.as_deref(), "--min", WHOLE)?;
            let max = bound::<i64>(options.max.as_deref(), "--max", WHOLE)?;
            let (min, max) = match (min, max) {
                (Some(min), Some(max)) => (min, max),
                _ => {
                    return Err(CliError::invalid_argument(
                        "integer sampling needs both --min and --max",
                    ))
                }
            };
            let points = par_generate(sequencer, n, |seq| seq.integer_vector(min, max))?;
            Ok(Samples::Integer(points))
        }
        SampleKind::Gaussian => {
            if options.min.is_some() || options.max.is_some() {
                return Err(CliError::invalid_argument(
                    "gaussian sampling takes no --min/--max",
                ));
            }
            let points: Vec<Vec<f64>> = gaussian_batch(sequencer, n)?
                .into_iter()
                .map(|v| v.iter().copied().collect::<Vec<f64>>())
                .collect();
            Ok(Samples::Real(points))
        }
    }
}

/// Parses an optional bound in the numeric type of the sampled kind.
///
/// Integer bounds are parsed as `i64` directly so that values beyond 2^53
/// keep every digit.
fn bound<T: FromStr>(text: Option<&str>, flag: &str, expected: &str) -> Result<Option<T>> {
    text.map(|t| {
        t.trim().parse().map_err(|_| {
            CliError::invalid_argument(format!("{} expects {}, got '{}'", flag, expected, t))
        })
    })
    .transpose()
}
