//! Model loading, caching and inference

pub mod cache;
pub mod inference;
pub mod loader;

pub use cache::ModelCache;
pub use inference::{InferenceEngine, PredictError, Regressor, SharedModel};
pub use loader::{LoadError, ModelSource, OnnxModelLoader};
