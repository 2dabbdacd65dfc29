//! Prediction outcome data structures

use chrono::{DateTime, Local};
use std::time::Duration;

/// Format a silica concentration for display, two decimals with a percent sign
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Result of one prediction request
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Estimated final silica concentration (%), as returned by the model
    pub value: f64,
    /// When the prediction was made
    pub predicted_at: DateTime<Local>,
    /// Time spent inside the model call
    pub latency: Duration,
}

impl PredictionResult {
    pub fn new(value: f64, latency: Duration) -> Self {
        Self {
            value,
            predicted_at: Local::now(),
            latency,
        }
    }

    /// Value as shown on the form, e.g. `1.67%`
    pub fn display_value(&self) -> String {
        format_percentage(self.value)
    }
}
