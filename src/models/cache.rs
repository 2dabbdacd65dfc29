//! Load-once model handle

use crate::models::inference::SharedModel;
use crate::models::loader::{LoadError, ModelSource};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, error, info};

/// Process-lifetime handle to one model file.
///
/// The first call to [`ModelCache::get`] runs the source; every later call,
/// from any thread, gets a clone of that same outcome. Failures are cached
/// as well, so a missing file is reported once and not retried.
pub struct ModelCache<S: ModelSource> {
    source: S,
    path: PathBuf,
    slot: OnceLock<Result<SharedModel, LoadError>>,
}

impl<S: ModelSource> ModelCache<S> {
    pub fn new(source: S, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
            slot: OnceLock::new(),
        }
    }

    /// Get the model, loading it on first use
    pub fn get(&self) -> Result<SharedModel, LoadError> {
        if let Some(cached) = self.slot.get() {
            debug!(path = %self.path.display(), "Model served from cache");
            return cached.clone();
        }

        self.slot
            .get_or_init(|| {
                let loaded = self.source.load(&self.path);
                match &loaded {
                    Ok(_) => info!(path = %self.path.display(), "Model cached"),
                    Err(e) => error!(error = %e, "Model unavailable; prediction disabled"),
                }
                loaded
            })
            .clone()
    }

    /// Whether the load has already happened (successfully or not)
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
