//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each product binary must implement
//! to configure the scaffolding behavior for its own templates.

use crate::selection::Selection;
use crate::templates::copier::RenameRule;
use include_dir::Dir;
use std::path::Path;

/// Placeholder names that npm would otherwise strip or rewrite when publishing
pub const DEFAULT_RENAME_RULES: &[RenameRule] = &[RenameRule::new("_gitignore", ".gitignore")];

/// Entries that never make a destination count as "not empty"
pub const DEFAULT_EXCLUDED_ENTRIES: &[&str] = &[".git"];

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - The template tree compiled into the binary
/// - The default project name offered by the prompt
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Project name offered when the destination is prompted for
    fn default_project_name(&self) -> &'static str;

    /// Template root embedded in the binary, one subdirectory per template
    fn bundled_templates(&self) -> &'static Dir<'static>;

    /// Environment variable name for overriding the template root
    fn template_dir_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, selection: &Selection) -> Vec<String>;

    /// Manifest file at each template root whose `name` gets rewritten
    fn manifest_file(&self) -> &'static str {
        "package.json"
    }

    /// File renames applied while copying
    fn rename_rules(&self) -> &'static [RenameRule] {
        DEFAULT_RENAME_RULES
    }

    /// Top-level destination entries ignored by the emptiness check and
    /// preserved when the destination is cleared
    fn excluded_entries(&self) -> &'static [&'static str] {
        DEFAULT_EXCLUDED_ENTRIES
    }
}
