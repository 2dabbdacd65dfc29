//! End-to-end checks of load, predict and display with stub regressors.

use anyhow::{anyhow, Result};
use silica_predictor::ui::{App, Outcome};
use silica_predictor::{
    format_percentage, FeatureExtractor, FeatureRow, InferenceEngine, InputRecord, LoadError,
    ModelCache, OnnxModelLoader, PredictError, PredictionMetrics, Regressor, SharedModel,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Returns a fixed value and remembers the rows it saw
struct StubRegressor {
    value: f64,
    seen: Mutex<Vec<Vec<(String, f64)>>>,
}

impl StubRegressor {
    fn new(value: f64) -> Self {
        Self {
            value,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Regressor for StubRegressor {
    fn predict(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        self.seen
            .lock()
            .unwrap()
            .push(row.iter().map(|(n, v)| (n.to_string(), v)).collect());
        Ok(vec![self.value])
    }
}

struct ExplodingRegressor;

impl Regressor for ExplodingRegressor {
    fn predict(&self, _row: &FeatureRow) -> Result<Vec<f64>> {
        Err(anyhow!("booster raised: internal numeric error"))
    }
}

#[test]
fn concrete_scenario_displays_two_decimals() {
    let stub = Arc::new(StubRegressor::new(1.67));
    let engine = InferenceEngine::new(stub.clone(), FeatureExtractor::new());

    let result = engine
        .predict(&InputRecord::new(488.43, 200.13, 65.04))
        .unwrap();
    assert_eq!(result.value, 1.67);
    assert_eq!(format_percentage(result.value), "1.67%");

    let seen = stub.seen.lock().unwrap();
    assert_eq!(
        seen[0],
        vec![
            ("Amina Flow".to_string(), 488.43),
            ("Flotation Column 01 Air Flow".to_string(), 200.13),
            ("% Iron Concentrate".to_string(), 65.04),
        ]
    );
}

#[test]
fn cache_loads_once_and_feeds_the_form() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let cache = ModelCache::new(
        move |_path: &Path| -> Result<SharedModel, LoadError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubRegressor::new(1.67)))
        },
        "modelo.onnx",
    );

    for _ in 0..5 {
        cache.get().unwrap();
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    let engine = cache
        .get()
        .map(|model| InferenceEngine::new(model, FeatureExtractor::new()));
    let mut app = App::new(engine, Arc::new(PredictionMetrics::new()));
    app.predict();

    match &app.outcome {
        Some(Outcome::Success(result)) => assert_eq!(result.display_value(), "1.67%"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_model_disables_prediction() {
    let cache = ModelCache::new(OnnxModelLoader::new(), "definitely/not/here/modelo.onnx");

    let loaded = cache.get();
    assert!(matches!(loaded, Err(LoadError::ModelNotFound { .. })));
    assert!(matches!(cache.get(), Err(LoadError::ModelNotFound { .. })));

    let engine = loaded.map(|model| InferenceEngine::new(model, FeatureExtractor::new()));
    let mut app = App::new(engine, Arc::new(PredictionMetrics::new()));
    assert!(!app.can_predict());
    app.predict();
    assert!(app.outcome.is_none());
}

#[test]
fn boundary_values_complete() {
    let engine = InferenceEngine::new(Arc::new(StubRegressor::new(3.1)), FeatureExtractor::new());

    let corners = [
        InputRecord::new(241.7, 175.85, 62.51),
        InputRecord::new(739.3, 372.44, 68.01),
        InputRecord::new(241.7, 372.44, 62.51),
        InputRecord::new(739.3, 175.85, 68.01),
    ];
    for record in corners {
        assert!(record.is_within_bounds());
        assert_eq!(engine.predict(&record).unwrap().value, 3.1);
    }
}

#[test]
fn model_failure_is_surfaced_not_fatal() {
    let metrics = Arc::new(PredictionMetrics::new());
    let engine = InferenceEngine::new(Arc::new(ExplodingRegressor), FeatureExtractor::new());

    assert!(matches!(
        engine.predict(&InputRecord::default()),
        Err(PredictError::PredictionFailed(_))
    ));

    let mut app = App::new(Ok(engine), metrics.clone());
    app.predict();
    app.predict();

    match &app.outcome {
        Some(Outcome::Failure(message)) => assert!(message.contains("internal numeric error")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(metrics.failure_count(), 2);
    assert_eq!(metrics.prediction_count(), 0);
}
