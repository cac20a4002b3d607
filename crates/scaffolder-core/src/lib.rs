//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library turns a framework/variant choice into a starter project on
//! disk. It is designed to be used by product binaries that ship their own
//! template directories and configuration.
//!
//! # Architecture
//!
//! A run is strictly sequential:
//!
//! - **Resolver** - merges command-line values with prompt answers into a [`Selection`]
//! - **Guard** - refuses to write into a non-empty destination without consent
//! - **Copier** - copies the template tree, renaming placeholder files
//! - **Patcher** - rewrites the manifest's `name` to the destination's base name
//!
//! Cancellation is a normal [`Outcome`], not an error.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and the [`run`] entry point
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{scaffold, Selection, TemplateSet, Outcome};
//!
//! let templates = TemplateSet::local("templates", "package.json");
//! match scaffold(&MyConfig, &templates, &selection).await? {
//!     Outcome::Completed(report) => println!("{} files", report.files.len()),
//!     Outcome::Cancelled => println!("cancelled"),
//! }
//! ```

pub mod error;
pub mod product;
pub mod resolver;
pub mod scaffold;
pub mod selection;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use product::ProductConfig;
pub use resolver::{resolve, Choice, Prompter, ResolveInputs};
pub use scaffold::{scaffold, ScaffoldReport};
pub use selection::{
    parse_destination, parse_template, Framework, Outcome, Overwrite, Selection,
    TemplateDescriptor, Variant,
};
pub use templates::{RenameRule, Template, TemplateSet, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
