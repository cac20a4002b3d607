//! The write side of a run: guard, copy, then patch

use crate::product::ProductConfig;
use crate::selection::{Outcome, Selection};
use crate::templates::{guard, manifest, CopyRules, TemplateSet};
use anyhow::Result;
use std::path::PathBuf;

/// What a completed scaffold wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_dir: PathBuf,
    pub project_name: String,
    /// Files written, relative to `project_dir`, manifest last
    pub files: Vec<PathBuf>,
    /// Top-level entries removed from a non-empty destination
    pub removed: Vec<PathBuf>,
}

/// Materialise `selection` from `templates`.
///
/// The template is located before the destination is touched, so a broken
/// template set never costs the user their existing files. Cancellation is
/// only possible in the guard; once copying starts the run either completes
/// or fails.
pub async fn scaffold<C: ProductConfig>(
    config: &C,
    templates: &TemplateSet,
    selection: &Selection,
) -> Result<Outcome<ScaffoldReport>> {
    let template = templates.locate(&selection.template)?;
    let project_dir = selection.destination.clone();
    let project_name = selection.project_name();

    let removed = match guard::prepare_destination(
        &project_dir,
        selection.overwrite,
        config.excluded_entries(),
    )
    .await?
    {
        Outcome::Completed(removed) => removed,
        Outcome::Cancelled => return Ok(Outcome::Cancelled),
    };

    let manifest_file = templates.manifest_file();
    let rules = CopyRules {
        renames: config.rename_rules(),
        skip_top_level: &[manifest_file],
    };
    let mut files = template.copy_to(&project_dir, &rules).await?;

    manifest::patch_manifest(&template, &project_dir, manifest_file, &project_name).await?;
    files.push(PathBuf::from(manifest_file));

    tracing::debug!(
        template = %selection.template,
        dir = %project_dir.display(),
        files = files.len(),
        "scaffolded project"
    );

    Ok(Outcome::Completed(ScaffoldReport {
        project_dir,
        project_name,
        files,
        removed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestProduct;
    use crate::selection::{Framework, Overwrite, TemplateDescriptor, Variant};
    use std::fs;
    use tempfile::TempDir;

    fn seed_template(root: &std::path::Path) {
        let dir = root.join("vanilla-js");
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("package.json"), r#"{"name": "vanilla-js"}"#).unwrap();
        fs::write(dir.join("_gitignore"), "node_modules\n").unwrap();
        fs::write(dir.join("src/main.js"), "main").unwrap();
    }

    fn selection(destination: PathBuf, overwrite: Overwrite) -> Selection {
        Selection {
            destination,
            template: TemplateDescriptor::new(Framework::Vanilla, Variant::Js),
            overwrite,
        }
    }

    #[tokio::test]
    async fn test_scaffold_writes_tree_and_manifest() {
        let templates = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        seed_template(templates.path());
        let product = TestProduct;
        let set = TemplateSet::local(templates.path(), "package.json");

        let outcome = scaffold(&product, &set, &selection(out.path().join("demo"), Overwrite::No))
            .await
            .unwrap();

        let Outcome::Completed(report) = outcome else {
            panic!("expected completed scaffold");
        };
        assert_eq!(report.project_name, "demo");
        assert_eq!(
            report.files,
            vec![
                PathBuf::from(".gitignore"),
                PathBuf::from("src/main.js"),
                PathBuf::from("package.json"),
            ]
        );
        assert!(report.removed.is_empty());
        let manifest = fs::read_to_string(out.path().join("demo/package.json")).unwrap();
        assert!(manifest.contains("\"name\": \"demo\""));
    }

    #[tokio::test]
    async fn test_missing_template_fails_before_touching_destination() {
        let templates = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("keep.txt"), "mine").unwrap();
        let product = TestProduct;
        let set = TemplateSet::local(templates.path(), "package.json");

        let result = scaffold(&product, &set, &selection(out.path().to_path_buf(), Overwrite::Yes)).await;

        assert!(result.is_err());
        assert!(out.path().join("keep.txt").is_file());
    }

    #[tokio::test]
    async fn test_refused_overwrite_cancels() {
        let templates = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        seed_template(templates.path());
        fs::write(out.path().join("keep.txt"), "mine").unwrap();
        let product = TestProduct;
        let set = TemplateSet::local(templates.path(), "package.json");

        let outcome = scaffold(&product, &set, &selection(out.path().to_path_buf(), Overwrite::No))
            .await
            .unwrap();

        assert!(outcome.is_cancelled());
        assert!(!out.path().join("package.json").exists());
        assert!(out.path().join("keep.txt").is_file());
    }

    #[tokio::test]
    async fn test_scaffold_from_bundled_templates() {
        let out = TempDir::new().unwrap();
        let set = TemplateSet::bundled(TestProduct.bundled_templates(), "package.json");
        let selection = Selection {
            destination: out.path().join("app"),
            template: TemplateDescriptor::new(Framework::React, Variant::Ts),
            overwrite: Overwrite::No,
        };

        let outcome = scaffold(&TestProduct, &set, &selection).await.unwrap();

        let Outcome::Completed(report) = outcome else {
            panic!("expected completed scaffold");
        };
        assert_eq!(report.files.last(), Some(&PathBuf::from("package.json")));
        assert!(report.files.contains(&PathBuf::from(".gitignore")));
        let manifest = fs::read_to_string(out.path().join("app/package.json")).unwrap();
        assert!(manifest.contains("\"name\": \"app\""));
    }
}
