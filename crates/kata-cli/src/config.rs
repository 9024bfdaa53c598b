//! # Configuration File
//!
//! Optional YAML file passed with `--config`. Every field has a default, so
//! an empty or partial file is valid. Command-line flags take precedence
//! over values from the file.
//!
//! ```yaml
//! sort:
//!   unclassified: pass_through   # or pass-through, or reject (default)
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use kata_core::UnclassifiedPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KataConfig {
    /// Category sort settings.
    pub sort: SortConfig,
}

/// Settings for `kata sort` and sort cases in `kata check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    /// Handling of characters outside the four sort categories.
    pub unclassified: UnclassifiedPolicy,
}

impl KataConfig {
    /// Load configuration from `path`, or return defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from YAML text. Blank text yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
