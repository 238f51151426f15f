//! Exporter configuration
//!
//! Optional TOML file, every field has a default:
//!
//! ```toml
//! [export]
//! dedup = "linear"          # or "hashed" (default)
//! debug = false             # write a JSON dump instead of the container
//! append_extension = true   # add ".toy" when the destination lacks it
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::dedup::DedupStrategy;
use crate::error::ExportError;

/// Settings for one export run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub dedup: DedupStrategy,
    pub debug: bool,
    pub append_extension: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dedup: DedupStrategy::default(),
            debug: false,
            append_extension: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    export: ExportConfig,
}

impl ExportConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Self::parse(&content).map_err(|message| ExportError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str::<ConfigFile>(content)
            .map(|file| file.export)
            .map_err(|e| e.to_string())
    }
}
