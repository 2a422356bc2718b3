use serde::Deserialize;
use std::path::Path;

/// Top-level configuration loaded from ab-extract.toml.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ExtractorConfig {
    pub output: OutputConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub delimiter: String,
    pub decimal_separator: char,
    pub header: bool,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Fail on an undecodable failure breakdown instead of reporting zeros.
    pub strict: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            decimal_separator: ',',
            header: true,
        }
    }
}

/// Load config from `path`, or defaults if it is absent or unusable.
pub fn load_config(path: &Path) -> ExtractorConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return ExtractorConfig::default();
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "failed to read config, using defaults");
            return ExtractorConfig::default();
        }
    };

    match toml::from_str(&contents) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("failed to parse {}: {e}", path.display());
            ExtractorConfig::default()
        }
    }
}
