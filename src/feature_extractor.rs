//! Feature extraction for silica concentration inference.
//!
//! Builds the single labeled row the regressor expects. The column names
//! are an external contract with the trained artifact: they come from
//! configuration and are never inferred or renamed here.

use anyhow::{ensure, Result};

use crate::models::inference::PredictError;
use crate::types::record::{InputRecord, FEATURE_COUNT, TRAINED_FEATURE_NAMES};

/// Single-row labeled record in the model's feature order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    /// Feature names, in training order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Feature values, in training order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values narrowed to `f32`, the tensor type ONNX regressors take
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a value by column name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx])
    }

    /// Iterate `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Turns form inputs into model input rows.
pub struct FeatureExtractor {
    feature_names: Vec<String>,
}

impl FeatureExtractor {
    /// Create an extractor using the trained column names.
    pub fn new() -> Self {
        Self {
            feature_names: TRAINED_FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Create an extractor using configured column names.
    ///
    /// Fails unless exactly `FEATURE_COUNT` names are given.
    pub fn with_names(feature_names: Vec<String>) -> Result<Self> {
        ensure!(
            feature_names.len() == FEATURE_COUNT,
            "expected {} feature names, got {}",
            FEATURE_COUNT,
            feature_names.len()
        );
        Ok(Self { feature_names })
    }

    /// Extract the feature row from a record.
    ///
    /// Range is not re-checked (the form clamps), but non-finite values are
    /// rejected before they reach the model.
    pub fn extract(&self, record: &InputRecord) -> Result<FeatureRow, PredictError> {
        let values = record.values();

        for (name, &value) in self.feature_names.iter().zip(values.iter()) {
            if !value.is_finite() {
                return Err(PredictError::NonFinite {
                    feature: name.clone(),
                    value,
                });
            }
        }

        Ok(FeatureRow {
            names: self.feature_names.clone(),
            values: values.to_vec(),
        })
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Get feature names (training order).
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_extraction_order() {
        let extractor = FeatureExtractor::new();
        let row = extractor
            .extract(&InputRecord::new(488.43, 200.13, 65.04))
            .unwrap();

        assert_eq!(row.len(), extractor.feature_count());
        assert_eq!(row.values(), &[488.43, 200.13, 65.04]);
        assert_eq!(row.names()[0], "Amina Flow");
        assert_eq!(row.names()[1], "Flotation Column 01 Air Flow");
        assert_eq!(row.names()[2], "% Iron Concentrate");
        assert_eq!(row.get("% Iron Concentrate"), Some(65.04));
    }

    #[test]
    fn test_configured_names_are_used_verbatim() {
        let extractor = FeatureExtractor::with_names(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ])
        .unwrap();
        let row = extractor.extract(&InputRecord::default()).unwrap();
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_with_names_rejects_wrong_count() {
        let err = FeatureExtractor::with_names(vec!["Amina Flow".to_string(), "b".to_string()])
            .err()
            .unwrap();
        assert!(err.to_string().contains("expected 3 feature names, got 2"));

        let four = vec!["a", "b", "c", "d"].into_iter().map(String::from).collect();
        assert!(FeatureExtractor::with_names(four).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let extractor = FeatureExtractor::new();

        let err = extractor
            .extract(&InputRecord::new(488.43, f64::NAN, 65.04))
            .unwrap_err();
        match err {
            PredictError::NonFinite { feature, .. } => {
                assert_eq!(feature, "Flotation Column 01 Air Flow")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(extractor
            .extract(&InputRecord::new(f64::INFINITY, 200.0, 65.0))
            .is_err());
    }
}
