//! Silica Concentration Predictor Library
//!
//! Loads a pre-trained flotation regressor once and serves predictions of
//! the final silica concentration from an interactive terminal form.

pub mod config;
pub mod feature_extractor;
pub mod metrics;
pub mod models;
pub mod types;
pub mod ui;

pub use config::AppConfig;
pub use feature_extractor::{FeatureExtractor, FeatureRow};
pub use metrics::PredictionMetrics;
pub use models::{
    InferenceEngine, LoadError, ModelCache, ModelSource, OnnxModelLoader, PredictError, Regressor,
    SharedModel,
};
pub use types::{format_percentage, InputRecord, PredictionResult};
