//! Typed errors for argument validation and bundled template faults

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Destination path rejected by the path rule
    #[error("The path cannot be found: {0}")]
    InvalidPath(String),

    /// Template identifier is not `<framework>-<variant>`
    #[error("Please select one of these options: {allowed}")]
    InvalidTemplate { allowed: String },

    /// No directory for a valid framework/variant pair
    #[error("Template '{template}' not found in {root}")]
    TemplateNotFound { template: String, root: String },

    /// Template directory exists but carries no manifest
    #[error("Template '{template}' is missing its {file}")]
    ManifestNotFound { template: String, file: String },

    /// Manifest parsed, but is not a JSON object
    #[error("{} is not a JSON object", path.display())]
    ManifestNotObject { path: PathBuf },

    /// Destination exists but cannot receive a template
    #[error("{} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
