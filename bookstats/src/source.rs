// Book loading for the CLI: URL or local file, optionally without Gutenberg boilerplate

use anyhow::{Context, Result};
use corpus_text::corpus::{fetch_text, read_text};
use corpus_text::gutenberg::strip_markers;
use std::path::Path;

/// Whether a source argument should be fetched over HTTP
pub fn is_url(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Load the book text named by `source`
pub async fn load_text(source: &str, raw: bool) -> Result<String> {
    let text = if is_url(source) {
        fetch_text(source)
            .await
            .with_context(|| format!("Failed to fetch {}", source))?
    } else {
        read_text(Path::new(source)).with_context(|| format!("Failed to read {}", source))?
    };

    log::debug!("Loaded {} characters from {}", text.chars().count(), source);
    if raw {
        Ok(text)
    } else {
        Ok(strip_markers(&text))
    }
}
