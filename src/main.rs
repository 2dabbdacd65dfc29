//! Silica Concentration Predictor - Main Entry Point
//!
//! Loads the trained regressor once and runs the terminal prediction form.

use anyhow::{Context, Result};
use silica_predictor::{
    config::{AppConfig, LogFormat, LoggingConfig},
    feature_extractor::FeatureExtractor,
    metrics::PredictionMetrics,
    models::{InferenceEngine, ModelCache, OnnxModelLoader},
    ui::{self, App},
};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // The terminal belongs to the form, so logs go to a file
    init_tracing(&config.logging)?;

    info!("Starting Silica Concentration Predictor");
    info!(
        model_path = %config.model.path.display(),
        features = ?config.model.feature_names,
        "Configuration loaded successfully"
    );

    let metrics = Arc::new(PredictionMetrics::new());

    let cache = ModelCache::new(
        OnnxModelLoader::with_threads(config.model.onnx_threads)
            .with_output_name(config.model.output_name.clone()),
        config.model.path.clone(),
    );
    let extractor = FeatureExtractor::with_names(config.model.feature_names.clone())?;

    let engine = cache
        .get()
        .map(|model| InferenceEngine::new(model, extractor));
    if let Err(e) = &engine {
        warn!(error = %e, "Starting with prediction disabled");
    }

    let mut app = App::new(engine, metrics.clone());
    ui::run(&mut app)?;

    info!("Predictor shutting down...");
    metrics.print_summary();

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("silica_predictor={}", logging.level)))
        .context("Invalid log level")?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logging.file)
        .with_context(|| format!("Failed to open log file {}", logging.file.display()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }

    Ok(())
}
