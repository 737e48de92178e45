//! State command implementation
//!
//! Prints the checkpoint of a seeded sequencer after a number of points.

use std::io::Write;

use qrand_core::QRandSequencer;
use tracing::info;

use super::seeded_sequencer;
use crate::config::CliConfig;
use crate::Result;

/// Run the state command
pub fn run(config: &CliConfig, advance: u64) -> Result<()> {
    let mut sequencer = seeded_sequencer(config)?;
    let stdout = std::io::stdout();
    write_state(&mut stdout.lock(), &mut sequencer, advance)
}

pub(crate) fn write_state<W: Write>(
    out: &mut W,
    sequencer: &mut QRandSequencer,
    advance: u64,
) -> Result<()> {
    info!("Advancing {} points", advance);
    sequencer.skip(advance);
    writeln!(out, "{}", sequencer.to_state_string())?;
    Ok(())
}
