//! Checkpoint and resume of sequencer state across instances.

use qrand_core::rng::ScrambleRng;
use qrand_core::{QRandSequencer, SequencerError, SequencerState};

fn seeded(dimensionality: usize, seed: u64) -> QRandSequencer {
    QRandSequencer::new(dimensionality, &mut ScrambleRng::from_seed(seed)).unwrap()
}

/// A resumed sequencer reproduces every adapter of the original.
#[test]
fn test_resume_reproduces_all_adapters() {
    let mut original = seeded(7, 314);
    for _ in 0..250 {
        original.advance();
    }

    let saved = original.to_state_string();
    let mut resumed = QRandSequencer::from_state_str(&saved).unwrap();

    for _ in 0..100 {
        assert_eq!(
            resumed.uniform_vector(-3.0, 3.0).unwrap(),
            original.uniform_vector(-3.0, 3.0).unwrap()
        );
        assert_eq!(
            resumed.integer_vector(0, 1_000).unwrap(),
            original.integer_vector(0, 1_000).unwrap()
        );
        assert_eq!(
            resumed.gaussian_standard().unwrap(),
            original.gaussian_standard().unwrap()
        );
    }
    assert_eq!(resumed.to_state_string(), original.to_state_string());
}

/// Loading into an existing sequencer fully replaces it.
#[test]
fn test_load_replaces_existing_state() {
    let mut source = seeded(3, 1);
    source.skip(42);
    let mut target = seeded(11, 2);
    target.advance();

    target.load_state(&source.to_state_string()).unwrap();
    assert_eq!(target, source);
}

/// Odd dimensionality survives the round trip, padding included.
#[test]
fn test_odd_dimension_round_trip() {
    let mut original = seeded(5, 9);
    original.skip(10);
    let mut resumed = QRandSequencer::from_state_str(&original.to_state_string()).unwrap();
    assert_eq!(resumed.dimensionality(), 5);
    assert_eq!(resumed.padded_dimensionality(), 6);
    assert_eq!(resumed.gaussian_standard().unwrap().len(), 5);
}

/// Fresh state encodes zero points.
#[test]
fn test_fresh_state_ends_with_zero() {
    let seq = seeded(4, 77);
    assert!(seq.to_state_string().ends_with(",0"));
}

/// Snapshots parse back to equal values and reject garbage.
#[test]
fn test_state_value_parsing() {
    let mut seq = seeded(12, 8);
    seq.skip(999);
    let state = seq.state();
    let parsed: SequencerState = state.to_string().parse().unwrap();
    assert_eq!(parsed, state);

    let empty: SequencerState = "".parse().unwrap();
    assert!(empty.is_empty());

    let err = "12,not-a-number".parse::<SequencerState>().unwrap_err();
    assert!(matches!(err, SequencerError::MalformedState { .. }));
}
