//! Type definitions for the silica predictor

pub mod prediction;
pub mod record;

pub use prediction::{format_percentage, PredictionResult};
pub use record::{Bounds, InputRecord};
