use super::ModeDocument;
use anyhow::{Context, Result};
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Load a mode document from a JSON or YAML file, chosen by extension
pub fn load_mode_file(path: &Path) -> Result<ModeDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mode file: {}", path.display()))?;

    let doc = if is_yaml(path) {
        ModeDocument::from_yaml_str(&content)
    } else {
        ModeDocument::from_json_str(&content)
    };

    doc.with_context(|| format!("Failed to parse mode file: {}", path.display()))
}

/// Save a mode document, using the same extension rule as loading
pub fn save_mode_file(path: &Path, doc: &ModeDocument) -> Result<()> {
    let content = if is_yaml(path) {
        doc.to_yaml_string()?
    } else {
        doc.to_json_string()?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write mode file: {}", path.display()))?;
    tracing::info!("Saved mode to {}", path.display());
    Ok(())
}
