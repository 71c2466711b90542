//! Risk scorer integration tests
//!
//! Covers the testable properties of the prediction pipeline:
//! - score bounds and level consistency
//! - confidence bounds
//! - monotonicity in rainfall, drainage density and elevation
//! - the reference scenarios (150mm/6h and the mild low-risk case)
//! - recommendation trigger stacking
//! - fallback behavior when the remote model fails

use proptest::prelude::*;

use floodsense_backend::error::{AppError, AppResult};
use floodsense_backend::services::prediction::{
    FallbackModel, NoJitter, RiskModel, SimulatedModel, FALLBACK_MODEL_VERSION,
    SIMULATED_MODEL_VERSION,
};
use shared::{validate_prediction_input, RiskLevel, RiskPredictionInput, RiskPredictionResult};

fn model() -> SimulatedModel {
    SimulatedModel::with_jitter(Box::new(NoJitter))
}

fn base_input() -> RiskPredictionInput {
    RiskPredictionInput {
        ward_id: "w16".to_string(),
        ward_name: "Laxmi Nagar".to_string(),
        rainfall: 0.0,
        duration: 0.0,
        elevation: None,
        drainage_density: None,
        historical_incidents: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_heavy_rain_scenario_scores_at_least_high() {
    // 150mm over 6h with all optional attributes defaulted
    let result = model().score(&RiskPredictionInput {
        rainfall: 150.0,
        duration: 6.0,
        ..base_input()
    });

    assert!(result.risk_score >= 60);
    assert!(matches!(
        result.risk_level,
        RiskLevel::High | RiskLevel::Critical
    ));
}

#[test]
fn test_mild_scenario_scores_low() {
    let result = model().score(&RiskPredictionInput {
        rainfall: 10.0,
        duration: 1.0,
        elevation: Some(280.0),
        drainage_density: Some(0.9),
        historical_incidents: Some(2.0),
        ..base_input()
    });

    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(
        result.recommendations,
        vec!["Routine monitoring sufficient"]
    );
}

#[test]
fn test_high_rainfall_critical_input_stacks_recommendations() {
    let result = model().score(&RiskPredictionInput {
        rainfall: 300.0,
        duration: 48.0,
        elevation: Some(0.0),
        drainage_density: Some(0.0),
        historical_incidents: Some(100.0),
        ..base_input()
    });

    assert_eq!(result.risk_level, RiskLevel::Critical);
    // Both the severity trigger and the rainfall trigger fire, in order
    assert_eq!(
        result.recommendations,
        vec![
            "Issue flood warning alert for the ward",
            "Pre-position emergency response teams",
            "Activate drainage pump stations",
            "Clear debris from storm drains",
        ]
    );
}

#[test]
fn test_validation_rejects_before_scoring() {
    let input = RiskPredictionInput {
        ward_id: "ward 01".to_string(),
        rainfall: 1500.0,
        ..base_input()
    };

    let violations = validate_prediction_input(&input).unwrap_err();
    assert!(violations.iter().any(|v| v.field == "wardId"));
    assert!(violations.iter().any(|v| v.field == "rainfall"));
}

#[test]
fn test_repeated_scoring_is_idempotent_modulo_jitter() {
    let input = RiskPredictionInput {
        rainfall: 87.0,
        duration: 14.0,
        drainage_density: Some(0.35),
        ..base_input()
    };

    let m = model();
    let a = m.score(&input);
    let b = m.score(&input);
    assert_eq!(a.risk_score, b.risk_score);
    assert_eq!(a.risk_level, b.risk_level);
    assert_eq!(a.factors, b.factors);
}

// ============================================================================
// Fallback behavior
// ============================================================================

struct FailingRemote;

#[async_trait::async_trait]
impl RiskModel for FailingRemote {
    async fn predict(&self, _: &RiskPredictionInput) -> AppResult<RiskPredictionResult> {
        Err(AppError::ModelError("503 Service Unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_remote_failure_never_surfaces_to_caller() {
    let fallback = FallbackModel::new(Some(Box::new(FailingRemote)), model());
    let result = fallback
        .predict(&RiskPredictionInput {
            rainfall: 150.0,
            duration: 6.0,
            ..base_input()
        })
        .await
        .expect("fallback must always return a result");

    assert_eq!(result.model_version, FALLBACK_MODEL_VERSION);
    assert!(!result.is_live);
    assert!((70.0..=98.0).contains(&result.confidence));
}

#[tokio::test]
async fn test_unconfigured_remote_uses_simulated_version_tag() {
    let fallback = FallbackModel::new(None, model());
    let result = fallback.predict(&base_input()).await.unwrap();
    assert_eq!(result.model_version, SIMULATED_MODEL_VERSION);
}

// ============================================================================
// Property Tests
// ============================================================================

fn arb_input() -> impl Strategy<Value = RiskPredictionInput> {
    (
        0.0f64..=1000.0,
        0.0f64..=168.0,
        proptest::option::of(0.0f64..=1000.0),
        proptest::option::of(0.0f64..=1.0),
        proptest::option::of(0.0f64..=1000.0),
    )
        .prop_map(|(rainfall, duration, elevation, drainage, historical)| {
            RiskPredictionInput {
                rainfall,
                duration,
                elevation,
                drainage_density: drainage,
                historical_incidents: historical,
                ..base_input()
            }
        })
}

proptest! {
    /// Property: the reported score is always within [0, 100].
    #[test]
    fn prop_score_bounded(input in arb_input()) {
        let result = model().score(&input);
        prop_assert!((0..=100).contains(&result.risk_score));
    }

    /// Property: confidence is always within [70, 98], jitter included.
    #[test]
    fn prop_confidence_bounded(input in arb_input()) {
        let result = SimulatedModel::default().score(&input);
        prop_assert!((70.0..=98.0).contains(&result.confidence));
    }

    /// Property: the level is consistent with the thresholds on the score.
    /// The reported score is rounded, so assertions stay half-point clear
    /// of the boundaries.
    #[test]
    fn prop_level_consistent_with_score(input in arb_input()) {
        let result = model().score(&input);
        if result.risk_score >= 81 {
            prop_assert_eq!(result.risk_level, RiskLevel::Critical);
        }
        if result.risk_score <= 79 {
            prop_assert!(result.risk_level < RiskLevel::Critical);
        }
        if result.risk_score <= 59 {
            prop_assert!(result.risk_level < RiskLevel::High);
        }
        if result.risk_score <= 39 {
            prop_assert_eq!(result.risk_level, RiskLevel::Low);
        }
    }

    /// Property: more rainfall never lowers the score.
    #[test]
    fn prop_rainfall_monotonic(input in arb_input(), extra in 0.0f64..=200.0) {
        let more_rain = RiskPredictionInput {
            rainfall: (input.rainfall + extra).min(1000.0),
            ..input.clone()
        };
        let base = model().score(&input);
        let wetter = model().score(&more_rain);
        prop_assert!(wetter.risk_score >= base.risk_score);
    }

    /// Property: better drainage never raises the score.
    #[test]
    fn prop_drainage_monotonic(input in arb_input(), d1 in 0.0f64..=1.0, d2 in 0.0f64..=1.0) {
        let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let poor = model().score(&RiskPredictionInput {
            drainage_density: Some(lo),
            ..input.clone()
        });
        let good = model().score(&RiskPredictionInput {
            drainage_density: Some(hi),
            ..input
        });
        prop_assert!(good.risk_score <= poor.risk_score);
    }

    /// Property: higher ground never raises the score.
    #[test]
    fn prop_elevation_monotonic(input in arb_input(), e1 in 0.0f64..=1000.0, e2 in 0.0f64..=1000.0) {
        let (lo, hi) = if e1 <= e2 { (e1, e2) } else { (e2, e1) };
        let low_ground = model().score(&RiskPredictionInput {
            elevation: Some(lo),
            ..input.clone()
        });
        let high_ground = model().score(&RiskPredictionInput {
            elevation: Some(hi),
            ..input
        });
        prop_assert!(high_ground.risk_score <= low_ground.risk_score);
    }

    /// Property: every valid input yields a non-empty recommendation list.
    #[test]
    fn prop_recommendations_never_empty(input in arb_input()) {
        let result = model().score(&input);
        prop_assert!(!result.recommendations.is_empty());
    }
}
