use std::fs;
use std::path::Path;

use serde::Serialize;

use super::Result;

/// Writes `value` as YAML for `.yaml`/`.yml` paths and pretty JSON otherwise.
pub fn save_document<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let serialized = if matches!(extension.as_str(), "yaml" | "yml") {
        serde_yaml::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
