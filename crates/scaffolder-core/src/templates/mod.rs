//! Template location, destination preparation, copying, and manifest patching
//!
//! This module provides:
//! - Template lookup by framework/variant, embedded or on disk (TemplateSource, TemplateSet)
//! - The destination guard (emptiness check, overwrite-gated clearing)
//! - Tree copying with placeholder renames
//! - Manifest `name` rewriting

pub mod copier;
pub mod guard;
pub mod manifest;
pub mod registry;

pub use copier::{copy_embedded, copy_tree, CopyRules, RenameRule};
pub use guard::{empty_dir, is_empty_enough, needs_overwrite, prepare_destination};
pub use manifest::{patch_manifest, rename_manifest};
pub use registry::{Template, TemplateSet, TemplateSource};
