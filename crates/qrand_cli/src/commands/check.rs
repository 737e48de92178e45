//! Check command implementation
//!
//! Validates the effective configuration and exercises a checkpoint round trip.

use std::io::Write;

use qrand_core::QRandSequencer;
use tracing::info;

use super::seeded_sequencer;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    report(&mut stdout.lock(), config)
}

pub(crate) fn report<W: Write>(out: &mut W, config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    writeln!(out, "qrand {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "  dimension:  {}", config.dimension)?;
    match config.seed {
        Some(seed) => writeln!(out, "  seed:       {}", seed)?,
        None => writeln!(out, "  seed:       (entropy)")?,
    }
    writeln!(out, "  log level:  {}", config.log_level)?;
    writeln!(out, "  format:     {}", config.format)?;

    let mut sequencer = seeded_sequencer(config)?;
    writeln!(out, "  period:     {}", sequencer.period())?;
    self_test(&mut sequencer)?;
    writeln!(out, "Checkpoint round trip: OK")?;

    info!("Check complete");
    Ok(())
}

/// Advances, checkpoints and verifies the restored sequencer agrees.
fn self_test(sequencer: &mut QRandSequencer) -> Result<()> {
    sequencer.skip(1_000);
    let restored = QRandSequencer::from_state_str(&sequencer.to_state_string())?;
    compare_streams(sequencer, restored, 16)
}

/// Advances both sequencers `points` times and fails on the first mismatch.
fn compare_streams(
    original: &mut QRandSequencer,
    mut restored: QRandSequencer,
    points: usize,
) -> Result<()> {
    for _ in 0..points {
        if restored.advance() != original.advance() {
            return Err(CliError::CheckpointDiverged {
                point: original.count(),
            });
        }
    }
    Ok(())
}
