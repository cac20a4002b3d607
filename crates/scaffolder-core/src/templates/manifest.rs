//! Template manifest patching
//!
//! The manifest (`package.json` for the bundled templates) is the one file the
//! copier never touches. It is loaded as JSON, its `name` is replaced with the
//! destination's base name, and every other key is written back in its
//! original order.

use super::registry::Template;
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Replace the `name` field of a JSON manifest, keeping all other fields
pub fn rename_manifest(content: &str, project_name: &str, source: &Path) -> Result<String> {
    let mut manifest: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse {}", source.display()))?;

    let fields = manifest
        .as_object_mut()
        .ok_or_else(|| ScaffoldError::ManifestNotObject {
            path: source.to_path_buf(),
        })?;
    fields.insert("name".to_string(), Value::String(project_name.to_string()));

    let mut rendered =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
    rendered.push('\n');
    Ok(rendered)
}

/// Read `file_name` from `template`, rename it, and write it into `target_dir`
pub async fn patch_manifest(
    template: &Template,
    target_dir: &Path,
    file_name: &str,
    project_name: &str,
) -> Result<()> {
    let source = template.path_of(file_name);
    let content = template.read_to_string(file_name).await?;

    let patched = rename_manifest(&content, project_name, &source)?;

    let target = target_dir.join(file_name);
    fs::write(&target, patched)
        .await
        .with_context(|| format!("Failed to write file: {}", target.display()))?;

    tracing::debug!(manifest = %target.display(), name = project_name, "patched manifest");
    Ok(())
}
