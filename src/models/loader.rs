//! ONNX model loader

use crate::models::inference::SharedModel;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};

/// Why a model could not be made available.
///
/// Cloneable so a failed load can be cached and reported on every request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("model file not found at {}", path.display())]
    ModelNotFound { path: PathBuf },

    #[error("model file at {} could not be loaded: {reason}", path.display())]
    ModelCorrupt { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::ModelNotFound { path } | LoadError::ModelCorrupt { path, .. } => path,
        }
    }
}

/// Anything that can turn a path into a ready-to-use model
pub trait ModelSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<SharedModel, LoadError>;
}

impl<F> ModelSource for F
where
    F: Fn(&Path) -> Result<SharedModel, LoadError> + Send + Sync,
{
    fn load(&self, path: &Path) -> Result<SharedModel, LoadError> {
        self(path)
    }
}

/// Loaded ONNX model with metadata
pub struct LoadedModel {
    /// Model name (file stem)
    pub name: String,
    /// ONNX Runtime session; running it needs exclusive access
    pub session: Mutex<Session>,
    /// Input names declared by the graph, in order
    pub input_names: Vec<String>,
    /// Output holding the regression value
    pub output_name: String,
}

/// Loader for ONNX regressors
pub struct OnnxModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
    /// Output to read the regression value from; `None` picks it from the graph
    output_name: Option<String>,
}

impl OnnxModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
            output_name: None,
        }
    }

    /// Read predictions from a specific graph output
    pub fn with_output_name(mut self, output_name: Option<String>) -> Self {
        self.output_name = output_name;
        self
    }

    /// Load a single ONNX model from file
    pub fn load_model<P: AsRef<Path>>(&self, path: P) -> Result<LoadedModel, LoadError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());

        match std::fs::metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(model = %name, path = %path.display(), "Model file not found");
                return Err(LoadError::ModelNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(corrupt(path, e)),
        }

        info!(model = %name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()
            .map_err(|e| corrupt(path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| corrupt(path, e))?
            .with_intra_threads(self.onnx_threads)
            .map_err(|e| corrupt(path, e))?
            .commit_from_file(path)
            .map_err(|e| corrupt(path, e))?;

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        if input_names.is_empty() {
            return Err(corrupt(path, "graph declares no inputs"));
        }

        let outputs: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let output_name = self.select_output(path, &outputs)?;

        info!(
            model = %name,
            inputs = ?input_names,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(LoadedModel {
            name,
            session: Mutex::new(session),
            input_names,
            output_name,
        })
    }

    /// Pick the output holding the regression value.
    ///
    /// A configured name must exist in the graph. Without one, a single
    /// output is taken as is; with several, a `variable`/`output` name is
    /// preferred (the skl2onnx and onnxmltools convention), else the first.
    fn select_output(&self, path: &Path, outputs: &[String]) -> Result<String, LoadError> {
        if let Some(wanted) = &self.output_name {
            return outputs
                .iter()
                .find(|o| *o == wanted)
                .cloned()
                .ok_or_else(|| {
                    corrupt(
                        path,
                        format!("graph has no output named {wanted:?} (outputs: {outputs:?})"),
                    )
                });
        }

        match outputs {
            [] => Err(corrupt(path, "graph declares no outputs")),
            [only] => Ok(only.clone()),
            _ => {
                let chosen = outputs
                    .iter()
                    .find(|o| o.contains("variable") || o.contains("output"))
                    .unwrap_or(&outputs[0])
                    .clone();
                warn!(
                    path = %path.display(),
                    outputs = ?outputs,
                    chosen = %chosen,
                    "Graph has several outputs; set model.output_name to pick one explicitly"
                );
                Ok(chosen)
            }
        }
    }
}

impl Default for OnnxModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSource for OnnxModelLoader {
    fn load(&self, path: &Path) -> Result<SharedModel, LoadError> {
        let model = self.load_model(path)?;
        Ok(Arc::new(model))
    }
}

fn corrupt(path: &Path, reason: impl std::fmt::Display) -> LoadError {
    warn!(path = %path.display(), reason = %reason, "Model file could not be loaded");
    LoadError::ModelCorrupt {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
