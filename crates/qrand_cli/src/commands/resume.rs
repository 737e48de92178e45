//! Resume command implementation
//!
//! Continues sampling from a checkpoint printed by `state` or `sample --print-state`.

use super::restored_sequencer;
use super::sample::{emit, SampleOptions};
use crate::config::CliConfig;
use crate::Result;

/// Run the resume command
pub fn run(config: &CliConfig, state: &str, options: &SampleOptions) -> Result<()> {
    let mut sequencer = restored_sequencer(state)?;
    let stdout = std::io::stdout();
    emit(&mut stdout.lock(), &mut sequencer, options, config.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sample::{draw, SampleKind};
    use crate::commands::seeded_sequencer;
    use crate::config::OutputFormat;
    use crate::CliError;

    fn uniform(points: usize) -> SampleOptions {
        SampleOptions {
            kind: SampleKind::Uniform,
            points,
            min: None,
            max: None,
            print_state: true,
        }
    }

    /// Splitting a run at a checkpoint gives the same points as one run.
    #[test]
    fn test_resume_continues_sequence() {
        let config = CliConfig {
            dimension: 4,
            seed: Some(2024),
            ..Default::default()
        };
        let mut whole = seeded_sequencer(&config).unwrap();
        let expected = draw(&mut whole, &uniform(30)).unwrap();

        let mut first = seeded_sequencer(&config).unwrap();
        let head = draw(&mut first, &uniform(10)).unwrap();
        // Checkpoint text may carry a trailing newline from the shell
        let mut resumed = restored_sequencer(&format!("{}\n", first.to_state_string())).unwrap();
        let tail = draw(&mut resumed, &uniform(20)).unwrap();

        let (
            crate::output::Samples::Real(expected),
            crate::output::Samples::Real(head),
            crate::output::Samples::Real(tail),
        ) = (expected, head, tail)
        else {
            panic!("expected real samples");
        };
        assert_eq!([head, tail].concat(), expected);
        assert_eq!(resumed.to_state_string(), whole.to_state_string());
    }

    #[test]
    fn test_resume_emits_json() {
        let config = CliConfig {
            dimension: 2,
            seed: Some(1),
            ..Default::default()
        };
        let state = seeded_sequencer(&config).unwrap().to_state_string();
        let mut seq = restored_sequencer(&state).unwrap();

        let mut out = Vec::new();
        emit(&mut out, &mut seq, &uniform(3), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["points"].as_array().unwrap().len(), 3);
        assert!(value["state"].as_str().unwrap().ends_with(",3"));
    }

    #[test]
    fn test_resume_rejects_bad_state() {
        assert!(matches!(
            restored_sequencer("2,3,2,1"),
            Err(CliError::Sequencer(_))
        ));
        assert!(matches!(
            restored_sequencer(""),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
