use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("HTTP error{}: {url}", status.map(|c| format!(" (HTTP {})", c)).unwrap_or_default())]
    Http { url: String, status: Option<u16> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
