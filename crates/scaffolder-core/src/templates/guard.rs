//! Destination directory checks run before any template file is written

use crate::error::ScaffoldError;
use crate::selection::{Outcome, Overwrite};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// True when `dir` is missing, has no entries, or holds only `excluded` entries
pub async fn is_empty_enough(dir: &Path, excluded: &[&str]) -> Result<bool> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read directory: {}", dir.display()))
        }
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let name = entry.file_name();
        if !excluded.iter().any(|skip| name == *skip) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Whether the overwrite question must be asked for `dir`
pub async fn needs_overwrite(dir: &Path, excluded: &[&str]) -> Result<bool> {
    match fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => Ok(!is_empty_enough(dir, excluded).await?),
        // Missing paths are created later; non-directories fail in `prepare_destination`
        _ => Ok(false),
    }
}

/// Remove every top-level entry of `dir` except `excluded`, returning what was removed
pub async fn empty_dir(dir: &Path, excluded: &[&str]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let name = entry.file_name();
        if excluded.iter().any(|skip| name == *skip) {
            continue;
        }

        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?;

        // Symlinked directories are unlinked, never followed
        let removal = if file_type.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        removal.with_context(|| format!("Failed to remove {}", path.display()))?;

        tracing::debug!(path = %path.display(), "removed");
        removed.push(PathBuf::from(name));
    }

    removed.sort();
    Ok(removed)
}

/// Leave `dir` ready to receive a full template copy.
///
/// A directory holding non-excluded entries is cleared only with
/// [`Overwrite::Yes`]; otherwise the run is cancelled and nothing is touched.
/// A missing directory is created along with its parents.
pub async fn prepare_destination(
    dir: &Path,
    overwrite: Overwrite,
    excluded: &[&str],
) -> Result<Outcome<Vec<PathBuf>>> {
    match fs::metadata(dir).await {
        Ok(metadata) if !metadata.is_dir() => {
            return Err(ScaffoldError::NotADirectory(dir.to_path_buf()).into());
        }
        Ok(_) => {
            if is_empty_enough(dir, excluded).await? {
                return Ok(Outcome::Completed(Vec::new()));
            }
            return match overwrite {
                Overwrite::Yes => Ok(Outcome::Completed(empty_dir(dir, excluded).await?)),
                Overwrite::No => Ok(Outcome::Cancelled),
            };
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).with_context(|| format!("Failed to stat {}", dir.display())),
    }

    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    Ok(Outcome::Completed(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    const EXCLUDED: &[&str] = &[".git"];

    #[tokio::test]
    async fn test_missing_dir_is_empty_enough() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");

        assert!(is_empty_enough(&missing, EXCLUDED).await.unwrap());
        assert!(!needs_overwrite(&missing, EXCLUDED).await.unwrap());
    }

    #[tokio::test]
    async fn test_only_excluded_entries_is_empty_enough() {
        let tmp = TempDir::new().unwrap();
        stdfs::create_dir(tmp.path().join(".git")).unwrap();

        assert!(is_empty_enough(tmp.path(), EXCLUDED).await.unwrap());
        assert!(!needs_overwrite(tmp.path(), EXCLUDED).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_entries_need_overwrite() {
        let tmp = TempDir::new().unwrap();
        stdfs::create_dir(tmp.path().join(".git")).unwrap();
        stdfs::write(tmp.path().join(".editorconfig"), "root = true").unwrap();

        assert!(!is_empty_enough(tmp.path(), EXCLUDED).await.unwrap());
        assert!(needs_overwrite(tmp.path(), EXCLUDED).await.unwrap());
    }

    #[tokio::test]
    async fn test_consent_clears_all_but_excluded() {
        let tmp = TempDir::new().unwrap();
        stdfs::create_dir_all(tmp.path().join(".git/objects")).unwrap();
        stdfs::write(tmp.path().join(".git/HEAD"), "ref: refs/heads/main").unwrap();
        stdfs::create_dir_all(tmp.path().join("src/deep")).unwrap();
        stdfs::write(tmp.path().join("src/deep/old.ts"), "old").unwrap();
        stdfs::write(tmp.path().join("README.md"), "old").unwrap();

        let outcome = prepare_destination(tmp.path(), Overwrite::Yes, EXCLUDED)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Completed(vec![PathBuf::from("README.md"), PathBuf::from("src")])
        );
        let left: Vec<_> = stdfs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(left, vec![".git"]);
        assert_eq!(
            stdfs::read_to_string(tmp.path().join(".git/HEAD")).unwrap(),
            "ref: refs/heads/main"
        );
    }

    #[tokio::test]
    async fn test_refusal_cancels_without_changes() {
        let tmp = TempDir::new().unwrap();
        stdfs::write(tmp.path().join("keep.txt"), "mine").unwrap();

        let outcome = prepare_destination(tmp.path(), Overwrite::No, EXCLUDED)
            .await
            .unwrap();

        assert!(outcome.is_cancelled());
        assert_eq!(
            stdfs::read_to_string(tmp.path().join("keep.txt")).unwrap(),
            "mine"
        );
    }

    #[tokio::test]
    async fn test_empty_enough_dir_is_left_alone_even_without_consent() {
        let tmp = TempDir::new().unwrap();
        stdfs::create_dir(tmp.path().join(".git")).unwrap();

        let outcome = prepare_destination(tmp.path(), Overwrite::No, EXCLUDED)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed(Vec::new()));
        assert!(tmp.path().join(".git").is_dir());
    }

    #[tokio::test]
    async fn test_missing_dir_is_created_with_parents() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("out/nested/app");

        let outcome = prepare_destination(&target, Overwrite::No, EXCLUDED)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed(Vec::new()));
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_file_destination_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("app");
        stdfs::write(&target, "not a dir").unwrap();

        let err = prepare_destination(&target, Overwrite::Yes, EXCLUDED)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::NotADirectory(_))
        ));
        assert!(target.is_file());
    }
}
