//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod resume;
pub mod sample;
pub mod state;

use qrand_core::rng::ScrambleRng;
use qrand_core::{QRandSequencer, SequencerConfig};
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Builds a freshly scrambled sequencer from the effective configuration.
///
/// An entropy seed is logged so the run can be reproduced.
pub(crate) fn seeded_sequencer(config: &CliConfig) -> Result<QRandSequencer> {
    let seed = config.seed.unwrap_or_else(|| {
        let seed = ScrambleRng::from_entropy().seed();
        info!("No seed configured, drew {} from entropy", seed);
        seed
    });
    let sequencer = SequencerConfig::builder()
        .dimensionality(config.dimension)
        .seed(seed)
        .build()?
        .build_sequencer()?;
    Ok(sequencer)
}

/// Restores a sequencer from checkpoint text; its dimensionality wins.
pub(crate) fn restored_sequencer(state: &str) -> Result<QRandSequencer> {
    let sequencer = QRandSequencer::from_state_str(state.trim())?;
    if !sequencer.is_initialised() {
        return Err(crate::CliError::invalid_argument("checkpoint state is empty"));
    }
    info!(
        "Resuming {}-dimensional sequence at point {}",
        sequencer.dimensionality(),
        sequencer.count()
    );
    Ok(sequencer)
}
