use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chapters::ChapterRules;
use crate::error::{CorpusError, Result};

/// Settings for the corpus tools, stored in `~/.config/cli-programs/bookstats.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Maximum character gap between two quotes of the same dialogue exchange
    #[serde(default = "default_dialogue_gap")]
    pub dialogue_gap: usize,

    /// Number of chapters drawn by the random sampler
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Chapters whose body is this short (or shorter) are dropped
    #[serde(default = "default_min_chapter_chars")]
    pub min_chapter_chars: usize,

    /// All-caps lines that are section headers, never chapter titles
    #[serde(default = "default_reserved_headers")]
    pub reserved_headers: Vec<String>,

    /// Require a prose line shortly after a candidate title
    #[serde(default = "default_strict_titles")]
    pub strict_titles: bool,

    /// How many lines after a title to search for prose (strict mode)
    #[serde(default = "default_lookahead_lines")]
    pub lookahead_lines: usize,

    /// Minimum length of that prose line (strict mode)
    #[serde(default = "default_min_body_line_chars")]
    pub min_body_line_chars: usize,

    /// Line after which chapter search begins (e.g. a dedication)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_marker: Option<String>,
}

fn default_dialogue_gap() -> usize {
    crate::dialogue::DEFAULT_DIALOGUE_GAP
}

fn default_sample_size() -> usize {
    crate::sampling::DEFAULT_SAMPLE_SIZE
}

fn default_min_chapter_chars() -> usize {
    100
}

fn default_reserved_headers() -> Vec<String> {
    vec!["FIRST PART".to_string(), "SECOND PART".to_string()]
}

fn default_strict_titles() -> bool {
    true
}

fn default_lookahead_lines() -> usize {
    10
}

fn default_min_body_line_chars() -> usize {
    20
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            dialogue_gap: default_dialogue_gap(),
            sample_size: default_sample_size(),
            min_chapter_chars: default_min_chapter_chars(),
            reserved_headers: default_reserved_headers(),
            strict_titles: default_strict_titles(),
            lookahead_lines: default_lookahead_lines(),
            min_body_line_chars: default_min_body_line_chars(),
            start_marker: None,
        }
    }
}

impl CorpusConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: CorpusConfig = toml::from_str(&content)?;
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
            .map_err(|_| CorpusError::ConfigError("HOME not set".into()))?;
        Ok(PathBuf::from(home).join(".config/cli-programs/bookstats.toml"))
    }

    /// Chapter detection rules derived from this configuration
    pub fn chapter_rules(&self) -> ChapterRules {
        ChapterRules {
            reserved_headers: self.reserved_headers.clone(),
            strict: self.strict_titles,
            lookahead_lines: self.lookahead_lines,
            min_body_line_chars: self.min_body_line_chars,
            min_chapter_chars: self.min_chapter_chars,
            start_marker: self.start_marker.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CorpusConfig::default();
        assert_eq!(config.dialogue_gap, 500);
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.min_chapter_chars, 100);
        assert_eq!(config.reserved_headers, vec!["FIRST PART", "SECOND PART"]);
        assert!(config.start_marker.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
dialogue_gap = 250
strict_titles = false
start_marker = "To Romain Rolland, my dear friend"
"#;
        let config: CorpusConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dialogue_gap, 250);
        assert!(!config.strict_titles);
        assert_eq!(config.sample_size, 10);
        assert_eq!(
            config.start_marker.as_deref(),
            Some("To Romain Rolland, my dear friend")
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let config: CorpusConfig = toml::from_str("").unwrap();
        assert_eq!(config.dialogue_gap, 500);
        assert_eq!(config.lookahead_lines, 10);
        assert_eq!(config.min_body_line_chars, 20);
    }

    #[test]
    fn test_config_serialization() {
        let config = CorpusConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CorpusConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.reserved_headers, config.reserved_headers);
        assert_eq!(parsed.dialogue_gap, config.dialogue_gap);
    }

    #[test]
    fn test_config_path() {
        let path = CorpusConfig::config_path().unwrap();
        assert!(path.ends_with(".config/cli-programs/bookstats.toml"));
    }

    #[test]
    fn test_chapter_rules_follow_config() {
        let config = CorpusConfig {
            strict_titles: false,
            min_chapter_chars: 40,
            ..CorpusConfig::default()
        };
        let rules = config.chapter_rules();
        assert!(!rules.strict);
        assert_eq!(rules.min_chapter_chars, 40);
        assert_eq!(rules.reserved_headers.len(), 2);
    }
}
