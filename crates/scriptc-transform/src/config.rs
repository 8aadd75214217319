//! Pipeline configuration
//!
//! ```toml
//! passes = ["rename", "inline-code", "fold"]
//! max-iterations = 2
//!
//! [rename]
//! x = "y"
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::{Result, TransformError};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PipelineConfig {
    /// Pass names, run in order
    pub passes: Vec<String>,
    /// Identifier renames applied by the `rename` pass (old name -> new name)
    pub rename: HashMap<String, String>,
    /// How many times the whole pass list may run before giving up on a fixpoint
    pub max_iterations: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            passes: vec!["inline-code".to_string(), "fold".to_string()],
            rename: HashMap::new(),
            max_iterations: 1,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(source)?;
        if config.max_iterations == 0 {
            return Err(TransformError::NoIterations);
        }
        Ok(config)
    }

    /// Read and parse a pipeline config file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pipeline config {}", path.display()))?;
        let config = Self::from_toml_str(&source)
            .with_context(|| format!("failed to parse pipeline config {}", path.display()))?;
        log::debug!("Loaded pipeline config from {}: {:?}", path.display(), config.passes);
        Ok(config)
    }
}
