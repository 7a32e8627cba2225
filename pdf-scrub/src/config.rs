use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{PdfError, Result};

/// Settings for pdf-scrub, stored in `~/.config/cli-programs/pdf-scrub.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Directory that receives `<stem>_processed.txt` files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// First-page characters needed before a PDF counts as text-bearing
    #[serde(default = "default_min_extractable_chars")]
    pub min_extractable_chars: usize,

    /// Spans larger than `ratio * average size` are reported as headers
    #[serde(default = "default_header_size_ratio")]
    pub header_size_ratio: f32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("processed_pdfs")
}

fn default_min_extractable_chars() -> usize {
    crate::document::DEFAULT_MIN_EXTRACTABLE_CHARS
}

fn default_header_size_ratio() -> f32 {
    crate::structure::DEFAULT_HEADER_SIZE_RATIO
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            min_extractable_chars: default_min_extractable_chars(),
            header_size_ratio: default_header_size_ratio(),
        }
    }
}

impl ScrubConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: ScrubConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| PdfError::ConfigError("HOME not set".into()))?;
        Ok(PathBuf::from(home).join(".config/cli-programs/pdf-scrub.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScrubConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("processed_pdfs"));
        assert_eq!(config.min_extractable_chars, 50);
        assert!((config.header_size_ratio - 1.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: ScrubConfig = toml::from_str("output_dir = \"/tmp/scrubbed\"").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/scrubbed"));
        assert_eq!(config.min_extractable_chars, 50);
    }

    #[test]
    fn test_config_serialization() {
        let config = ScrubConfig {
            min_extractable_chars: 10,
            ..ScrubConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ScrubConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.min_extractable_chars, 10);
        assert_eq!(parsed.output_dir, config.output_dir);
    }

    #[test]
    fn test_config_path() {
        let path = ScrubConfig::config_path().unwrap();
        assert!(path.ends_with(".config/cli-programs/pdf-scrub.toml"));
    }
}
