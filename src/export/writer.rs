//! JSON file writer shared by export files and import reports

use std::path::Path;

use serde::Serialize;
use tokio::fs;
use tracing::debug;

use crate::error::Result;

/// Write `value` as UTF-8 JSON, pretty-printed with 2-space indentation.
///
/// Non-ASCII characters are written as-is rather than escaped.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text.as_bytes()).await?;
    debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_write_json_is_pretty_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &json!({"name": "Zoë", "tags": ["a"]})).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Zoë"));
        assert!(text.contains("\n  \"name\": \"Zoë\""));
        assert!(text.contains("\n    \"a\"\n"));
    }

    #[tokio::test]
    async fn test_write_json_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        assert!(write_json(&path, &json!({})).await.is_err());
    }
}
