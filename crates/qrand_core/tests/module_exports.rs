//! Integration tests for module exports.
//!
//! Verify that all public modules and types are reachable through absolute
//! paths and through the crate-root re-exports.

/// Crate-root re-exports cover the everyday API.
#[test]
fn test_root_exports() {
    use qrand_core::rng::ScrambleRng;
    use qrand_core::{QRandSequencer, SequencePoint, SequencerError, SequencerState};

    let mut seq = QRandSequencer::new(2, &mut ScrambleRng::from_seed(1)).unwrap();
    let point: SequencePoint = seq.advance();
    assert_eq!(point.len(), 2);

    let state: SequencerState = seq.state();
    assert_eq!(state.count(), 1);

    let err: SequencerError =
        QRandSequencer::new(5_000, &mut ScrambleRng::from_seed(1)).unwrap_err();
    assert!(matches!(err, SequencerError::InvalidDimension { .. }));
    assert_eq!(qrand_core::MAX_DIMENSIONALITY, 1000);
}

/// Randomness module is accessible via absolute path.
#[test]
fn test_rng_module_exports() {
    use qrand_core::rng::LowDiscrepancySequence;
    use qrand_core::rng::ScrambleRng;
    use qrand_core::rng::Scrambler;

    let mut rng = ScrambleRng::from_seed(3);
    let mut items = [1, 2, 3];
    rng.scramble(&mut items);

    let mut seq = qrand_core::QRandSequencer::new(2, &mut rng).unwrap();
    let mut point = [0.0; 2];
    seq.next_point(&mut point).unwrap();
}

/// Covariance, batch, config and primes modules are accessible.
#[test]
fn test_support_module_exports() {
    use nalgebra::DMatrix;
    use qrand_core::batch::{gaussian_batch, par_generate, uniform_batch};
    use qrand_core::config::{ConfigError, SequencerConfig};
    use qrand_core::covariance::sqrt_covariance;
    use qrand_core::primes::{is_tabulated_prime, FIRST_PRIMES};

    assert!(is_tabulated_prime(FIRST_PRIMES[10].into()));

    let root = sqrt_covariance(&DMatrix::<f64>::identity(2, 2)).unwrap();
    assert_eq!(root.shape(), (2, 2));

    let config = SequencerConfig::builder().dimensionality(2).seed(4).build().unwrap();
    let mut seq = config.build_sequencer().unwrap();
    assert_eq!(uniform_batch(&mut seq, 10, 0.0, 1.0).unwrap().len(), 10);
    assert_eq!(gaussian_batch(&mut seq, 10).unwrap().len(), 10);
    let before = seq.count();
    let counts = par_generate(&mut seq, 5, |s| {
        s.advance();
        Ok(s.count())
    })
    .unwrap();
    assert_eq!(counts, (before + 1..=before + 5).collect::<Vec<_>>());

    let err: ConfigError = SequencerConfig::builder().build().unwrap_err();
    assert!(err.to_string().contains("dimensionality"));
}
