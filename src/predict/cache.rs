//! Process-wide pipeline cache
//!
//! Holds one deserialized pipeline for the process lifetime, loaded on
//! first use. Initialization is single-flight: under concurrent first
//! calls the artifact is deserialized exactly once. A failed load is
//! returned to every waiting caller and is not cached, so a later call
//! retries; a permanently missing artifact fails every call identically.

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use crate::model::ChurnPipeline;
use crate::Result;

/// Lazily-initialized holder for the loaded pipeline
#[derive(Debug)]
pub struct ModelCache {
    path: PathBuf,
    cell: OnceCell<ChurnPipeline>,
}

impl ModelCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ModelCache {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Get the cached pipeline, loading the artifact on first call.
    ///
    /// After a successful load the artifact file is never re-read.
    pub fn get_or_load(&self) -> Result<&ChurnPipeline> {
        self.cell.get_or_try_init(|| {
            log::info!("Loading pipeline artifact from {}", self.path.display());
            let pipeline = ChurnPipeline::load(&self.path)?;
            log::info!("Pipeline loaded successfully");
            Ok(pipeline)
        })
    }
}
