//! Configuration management for the silica predictor

use anyhow::{ensure, Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::record::{FEATURE_COUNT, TRAINED_FEATURE_NAMES};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Log output format
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-line events
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path of the ONNX model file
    pub path: PathBuf,
    /// Number of intra-op threads for ONNX inference (default: 1)
    pub onnx_threads: usize,
    /// Column names the model was trained on, in training order
    pub feature_names: Vec<String>,
    /// Graph output holding the prediction; unset picks it from the graph
    pub output_name: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("modelo.onnx"),
            onnx_threads: 1,
            feature_names: TRAINED_FEATURE_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            output_name: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: LogFormat,
    /// File the log is written to; the terminal is owned by the form
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: PathBuf::from("silica-predictor.log"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when the file is absent
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.model.feature_names.len() == FEATURE_COUNT,
            "model.feature_names must list exactly {} names, got {}",
            FEATURE_COUNT,
            self.model.feature_names.len()
        );
        ensure!(
            self.model.feature_names.iter().all(|n| !n.trim().is_empty()),
            "model.feature_names must not contain empty names"
        );
        ensure!(self.model.onnx_threads > 0, "model.onnx_threads must be at least 1");
        if let Some(name) = &self.model.output_name {
            ensure!(!name.trim().is_empty(), "model.output_name must not be empty");
        }
        Ok(())
    }
}
