//! Template tree copying with placeholder renames

use anyhow::{Context, Result};
use include_dir::{Dir, DirEntry};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Maps a reserved placeholder file name to the name written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameRule {
    pub from: &'static str,
    pub to: &'static str,
}

impl RenameRule {
    pub const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }
}

/// What the copier renames and what it leaves for other stages
#[derive(Debug, Clone, Copy)]
pub struct CopyRules<'a> {
    /// Applied to file names only, at every depth
    pub renames: &'a [RenameRule],
    /// Names skipped at the template root only (the manifest)
    pub skip_top_level: &'a [&'a str],
}

impl CopyRules<'_> {
    fn target_name<'n>(&self, name: &'n OsStr) -> &'n OsStr {
        self.renames
            .iter()
            .find(|rule| name == rule.from)
            .map(|rule| OsStr::new(rule.to))
            .unwrap_or(name)
    }

    fn skips(&self, name: &OsStr) -> bool {
        self.skip_top_level.iter().any(|skip| name == *skip)
    }
}

/// Copy every entry under `source` into `target`, returning the copied files
/// as paths relative to `target` (after renames), sorted.
///
/// Traversal uses an explicit work list of `(source dir, target dir)` pairs
/// rather than recursion, so template depth is bounded only by memory.
/// Symlinks to files are copied as regular files; symlinked directories are
/// never entered, so a link cycle cannot grow the work list.
pub async fn copy_tree(source: &Path, target: &Path, rules: &CopyRules<'_>) -> Result<Vec<PathBuf>> {
    let mut pending: Vec<(PathBuf, PathBuf, PathBuf)> =
        vec![(source.to_path_buf(), target.to_path_buf(), PathBuf::new())];
    let mut copied_files = Vec::new();

    while let Some((from_dir, to_dir, relative)) = pending.pop() {
        fs::create_dir_all(&to_dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", to_dir.display()))?;

        let at_root = relative.as_os_str().is_empty();
        let mut entries = fs::read_dir(&from_dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", from_dir.display()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("Failed to read directory: {}", from_dir.display()))?
        {
            let name = entry.file_name();
            if at_root && rules.skips(&name) {
                continue;
            }

            let source_path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("Failed to stat {}", source_path.display()))?;

            if file_type.is_dir() {
                pending.push((source_path, to_dir.join(&name), relative.join(&name)));
                continue;
            }

            if file_type.is_symlink() && !linked_file(&source_path).await {
                tracing::warn!(path = %source_path.display(), "skipping symlink that is not a file");
                continue;
            }

            let target_name = rules.target_name(&name);
            let target_path = to_dir.join(target_name);
            fs::copy(&source_path, &target_path).await.with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    source_path.display(),
                    target_path.display()
                )
            })?;
            tracing::debug!(from = %source_path.display(), to = %target_path.display(), "copied");

            copied_files.push(relative.join(target_name));
        }
    }

    copied_files.sort();
    Ok(copied_files)
}

async fn linked_file(link: &Path) -> bool {
    fs::metadata(link)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

/// [`copy_tree`] for a template tree compiled into the binary.
///
/// Entry paths inside an embedded [`Dir`] are relative to the embedding root,
/// so only their final segment is used to build target paths.
pub async fn copy_embedded(
    source: &Dir<'_>,
    target: &Path,
    rules: &CopyRules<'_>,
) -> Result<Vec<PathBuf>> {
    let mut pending: Vec<(&Dir<'_>, PathBuf, PathBuf)> =
        vec![(source, target.to_path_buf(), PathBuf::new())];
    let mut copied_files = Vec::new();

    while let Some((from_dir, to_dir, relative)) = pending.pop() {
        fs::create_dir_all(&to_dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", to_dir.display()))?;

        let at_root = relative.as_os_str().is_empty();
        for entry in from_dir.entries() {
            let Some(name) = entry.path().file_name() else {
                continue;
            };
            if at_root && rules.skips(name) {
                continue;
            }

            match entry {
                DirEntry::Dir(dir) => {
                    pending.push((dir, to_dir.join(name), relative.join(name)));
                }
                DirEntry::File(file) => {
                    let target_name = rules.target_name(name);
                    let target_path = to_dir.join(target_name);
                    fs::write(&target_path, file.contents())
                        .await
                        .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
                    tracing::debug!(from = %file.path().display(), to = %target_path.display(), "copied");

                    copied_files.push(relative.join(target_name));
                }
            }
        }
    }

    copied_files.sort();
    Ok(copied_files)
}
