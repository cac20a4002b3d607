//! Locating template directories, embedded or on disk

use super::copier::{self, CopyRules};
use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::selection::TemplateDescriptor;
use anyhow::{Context, Result};
use include_dir::Dir;
use std::path::{Path, PathBuf};

/// Where the template root comes from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Explicit override (`--template-dir` or the product's env var)
    Local(PathBuf),
    /// Templates compiled into the binary
    Bundled(&'static Dir<'static>),
}

impl TemplateSource {
    /// Pick the template root: explicit override, then env var, then the
    /// product's embedded templates
    pub fn from_config<C: ProductConfig>(config: &C, override_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = override_dir {
            return Self::Local(dir);
        }

        if let Some(dir) = std::env::var_os(config.template_dir_env()) {
            if !dir.is_empty() {
                return Self::Local(PathBuf::from(dir));
            }
        }

        Self::Bundled(config.bundled_templates())
    }

    /// Human-readable origin, used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Bundled(_) => "bundled templates".to_string(),
        }
    }
}

/// One located template, ready to be copied
#[derive(Debug, Clone)]
pub enum Template {
    Local(PathBuf),
    Bundled(&'static Dir<'static>),
}

impl Template {
    /// Copy the template tree into `target`, returning the copied files
    pub async fn copy_to(&self, target: &Path, rules: &CopyRules<'_>) -> Result<Vec<PathBuf>> {
        match self {
            Self::Local(dir) => copier::copy_tree(dir, target, rules).await,
            Self::Bundled(dir) => copier::copy_embedded(dir, target, rules).await,
        }
    }

    /// Path of `file_name` inside the template, for messages
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        match self {
            Self::Local(dir) => dir.join(file_name),
            Self::Bundled(dir) => dir.path().join(file_name),
        }
    }

    /// Read a top-level text file of the template
    pub async fn read_to_string(&self, file_name: &str) -> Result<String> {
        let path = self.path_of(file_name);
        match self {
            Self::Local(_) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            Self::Bundled(dir) => dir
                .get_file(&path)
                .and_then(|file| file.contents_utf8())
                .map(str::to_string)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn has_file(&self, file_name: &str) -> bool {
        let path = self.path_of(file_name);
        match self {
            Self::Local(_) => path.is_file(),
            Self::Bundled(dir) => dir.get_file(&path).is_some(),
        }
    }
}

/// The set of templates under one root, one directory per descriptor
#[derive(Debug, Clone)]
pub struct TemplateSet {
    source: TemplateSource,
    manifest_file: &'static str,
}

impl TemplateSet {
    pub fn new(source: TemplateSource, manifest_file: &'static str) -> Self {
        Self {
            source,
            manifest_file,
        }
    }

    /// Templates read from a directory on disk
    pub fn local(root: impl Into<PathBuf>, manifest_file: &'static str) -> Self {
        Self::new(TemplateSource::Local(root.into()), manifest_file)
    }

    /// Templates compiled into the binary
    pub fn bundled(root: &'static Dir<'static>, manifest_file: &'static str) -> Self {
        Self::new(TemplateSource::Bundled(root), manifest_file)
    }

    pub fn from_source<C: ProductConfig>(config: &C, source: &TemplateSource) -> Self {
        Self::new(source.clone(), config.manifest_file())
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn manifest_file(&self) -> &'static str {
        self.manifest_file
    }

    /// Template for `template`, failing if it or its manifest is missing.
    /// Either failure means the template set is broken, not the input.
    pub fn locate(&self, template: &TemplateDescriptor) -> Result<Template> {
        let id = template.to_string();
        let found = match &self.source {
            TemplateSource::Local(root) => {
                let dir = root.join(&id);
                dir.is_dir().then_some(Template::Local(dir))
            }
            TemplateSource::Bundled(root) => {
                let root: &'static Dir<'static> = *root;
                root.get_dir(&id).map(Template::Bundled)
            }
        };

        let Some(found) = found else {
            return Err(ScaffoldError::TemplateNotFound {
                template: id,
                root: self.source.describe(),
            }
            .into());
        };

        if !found.has_file(self.manifest_file) {
            return Err(ScaffoldError::ManifestNotFound {
                template: id,
                file: self.manifest_file.to_string(),
            }
            .into());
        }

        tracing::debug!(template = %template, dir = %found.path_of("").display(), "located template");
        Ok(found)
    }

    /// Check that every framework/variant pair has a usable template
    pub fn verify_all(&self) -> Result<()> {
        for template in TemplateDescriptor::all() {
            self.locate(&template)?;
        }
        Ok(())
    }
}
