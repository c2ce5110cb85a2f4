use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Write a value as pretty-printed JSON, replacing any existing file
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
    Ok(())
}
