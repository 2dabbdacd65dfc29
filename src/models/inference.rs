//! Regression inference: the model seam and the prediction handler

use crate::feature_extractor::{FeatureExtractor, FeatureRow};
use crate::models::loader::LoadedModel;
use crate::types::prediction::PredictionResult;
use crate::types::record::InputRecord;
use anyhow::{anyhow, Context, Result};
use ort::value::Tensor;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error};

/// A trained regressor: one feature row in, model outputs out.
pub trait Regressor: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<Vec<f64>>;
}

/// Model shared read-only between every request
pub type SharedModel = Arc<dyn Regressor>;

/// Why a single prediction request failed
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictError {
    #[error("{feature} must be a finite number, got {value}")]
    NonFinite { feature: String, value: f64 },

    #[error("prediction failed: {0}")]
    PredictionFailed(String),
}

/// Prediction handler bound to a loaded model
#[derive(Clone)]
pub struct InferenceEngine {
    model: SharedModel,
    extractor: Arc<FeatureExtractor>,
}

impl InferenceEngine {
    pub fn new(model: SharedModel, extractor: FeatureExtractor) -> Self {
        Self {
            model,
            extractor: Arc::new(extractor),
        }
    }

    pub fn feature_names(&self) -> &[String] {
        self.extractor.feature_names()
    }

    /// Predict the silica concentration for one set of inputs.
    ///
    /// The model's first output is returned unmodified.
    pub fn predict(&self, inputs: &InputRecord) -> Result<PredictionResult, PredictError> {
        let row = self.extractor.extract(inputs)?;

        let start = Instant::now();
        let outputs = self.model.predict(&row).map_err(|e| {
            error!(error = %e, inputs = ?inputs, "Model inference failed");
            PredictError::PredictionFailed(format!("{e:#}"))
        })?;
        let latency = start.elapsed();

        let value = outputs.first().copied().ok_or_else(|| {
            error!(inputs = ?inputs, "Model returned no output");
            PredictError::PredictionFailed("model returned no output".to_string())
        })?;

        debug!(
            value = value,
            latency_us = latency.as_micros() as u64,
            "Prediction complete"
        );

        Ok(PredictionResult::new(value, latency))
    }
}

impl LoadedModel {
    /// Whether the graph takes one named input per feature
    /// (column-wise exports) rather than a single `[1, n]` matrix.
    fn binds_by_name(&self, row: &FeatureRow) -> bool {
        self.input_names.len() == row.len()
            && row.names().iter().all(|n| self.input_names.contains(n))
    }
}

impl Regressor for LoadedModel {
    fn predict(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        let mut inputs: Vec<(String, Tensor<f32>)> = Vec::with_capacity(row.len());

        if self.binds_by_name(row) {
            for (name, value) in row.iter() {
                let tensor = Tensor::from_array((vec![1_i64, 1], vec![value as f32]))
                    .with_context(|| format!("Failed to create input tensor for {name}"))?;
                inputs.push((name.to_string(), tensor));
            }
        } else {
            // Prepare input tensor - shape [1, num_features]
            let shape = vec![1_i64, row.len() as i64];
            let tensor = Tensor::from_array((shape, row.to_f32()))
                .context("Failed to create input tensor")?;
            inputs.push((self.input_names[0].clone(), tensor));
        }

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow!("Lock error: {}", e))?;

        let outputs = session
            .run(inputs)
            .with_context(|| format!("Model {} failed to run", self.name))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| anyhow!("Model output {} missing", self.output_name))?;

        // XGBoost exports emit f32; some converters keep doubles
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            return Ok(data.iter().map(|&v| v as f64).collect());
        }
        let (_, data) = output
            .try_extract_tensor::<f64>()
            .context("Model output is not a float tensor")?;
        Ok(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _row: &FeatureRow) -> Result<Vec<f64>> {
            Ok(vec![self.0])
        }
    }

    struct Failing;

    impl Regressor for Failing {
        fn predict(&self, _row: &FeatureRow) -> Result<Vec<f64>> {
            Err(anyhow!("feature shape mismatch: expected 4 columns, got 3"))
        }
    }

    struct Empty;

    impl Regressor for Empty {
        fn predict(&self, _row: &FeatureRow) -> Result<Vec<f64>> {
            Ok(Vec::new())
        }
    }

    /// Echoes the row so tests can see what reached the model
    struct Echo;

    impl Regressor for Echo {
        fn predict(&self, row: &FeatureRow) -> Result<Vec<f64>> {
            Ok(row.values().to_vec())
        }
    }

    fn engine(model: impl Regressor + 'static) -> InferenceEngine {
        InferenceEngine::new(Arc::new(model), FeatureExtractor::new())
    }

    #[test]
    fn test_pass_through() {
        let engine = engine(Constant(1.67));
        let result = engine
            .predict(&InputRecord::new(488.43, 200.13, 65.04))
            .unwrap();
        assert_eq!(result.value, 1.67);
        assert_eq!(result.display_value(), "1.67%");
    }

    #[test]
    fn test_first_output_is_used() {
        let engine = engine(Echo);
        let result = engine
            .predict(&InputRecord::new(300.0, 250.0, 63.0))
            .unwrap();
        assert_eq!(result.value, 300.0);
    }

    #[test]
    fn test_boundaries_are_accepted() {
        let engine = engine(Constant(2.5));
        for record in [
            InputRecord::new(241.7, 175.85, 62.51),
            InputRecord::new(739.3, 372.44, 68.01),
        ] {
            assert_eq!(engine.predict(&record).unwrap().value, 2.5);
        }
    }

    #[test]
    fn test_model_error_is_reported() {
        let engine = engine(Failing);
        let err = engine.predict(&InputRecord::default()).unwrap_err();
        match err {
            PredictError::PredictionFailed(cause) => assert!(cause.contains("shape mismatch")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_output_is_reported() {
        let engine = engine(Empty);
        assert!(matches!(
            engine.predict(&InputRecord::default()),
            Err(PredictError::PredictionFailed(_))
        ));
    }

    #[test]
    fn test_non_finite_never_reaches_model() {
        let engine = engine(Failing);
        let err = engine
            .predict(&InputRecord::new(f64::NAN, 200.0, 65.0))
            .unwrap_err();
        assert!(matches!(err, PredictError::NonFinite { .. }));
    }

    #[test]
    fn test_idempotent() {
        let engine = engine(Echo);
        let record = InputRecord::default();
        let first = engine.predict(&record).unwrap();
        let second = engine.predict(&record).unwrap();
        assert_eq!(first.value, second.value);
    }
}
