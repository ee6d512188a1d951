//! Session persistence tests

use creator_valuation::session::{ValuationSession, SESSION_VERSION};
use creator_valuation::simulation::{run_monte_carlo, seeded_rng, Perturbation};
use creator_valuation::valuation::{ValuationEngine, ValuationInput};

#[test]
fn test_session_resume_reproduces_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let input = ValuationInput::manual(80_000.0, 12.0, 9.0, 6, 40.0);
    let engine = ValuationEngine::default();
    let result = engine.evaluate(&input).unwrap();
    let stats = run_monte_carlo(&input, 200, Perturbation::default(), &mut seeded_rng(1))
        .unwrap()
        .stats();

    ValuationSession::new(input)
        .with_result(result.clone())
        .with_monte_carlo(stats)
        .save(&path)
        .unwrap();

    let loaded = ValuationSession::load(&path).unwrap();
    assert_eq!(loaded.version, SESSION_VERSION);
    assert_eq!(loaded.result.as_ref(), Some(&result));
    assert_eq!(loaded.monte_carlo, Some(stats));
    assert_eq!(engine.evaluate(&loaded.input).unwrap(), result);
}
