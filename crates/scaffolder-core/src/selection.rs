//! Selection types and the validators applied to externally supplied input

use crate::error::ScaffoldError;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Application style of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    Vanilla,
    React,
}

impl Framework {
    /// All frameworks, in prompt order
    pub const ALL: [Framework; 2] = [Framework::Vanilla, Framework::React];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Vanilla => "vanilla",
            Framework::React => "react",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Vanilla => "Vanilla",
            Framework::React => "React",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Framework::ALL
            .into_iter()
            .find(|framework| framework.as_str() == s)
            .ok_or(())
    }
}

/// Source language of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Js,
    Ts,
}

impl Variant {
    /// All variants, in prompt order
    pub const ALL: [Variant; 2] = [Variant::Js, Variant::Ts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Js => "js",
            Variant::Ts => "ts",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Js => "Javascript",
            Variant::Ts => "Typescript",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or(())
    }
}

/// A `<framework>-<variant>` pair naming exactly one bundled template directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateDescriptor {
    pub framework: Framework,
    pub variant: Variant,
}

impl TemplateDescriptor {
    pub fn new(framework: Framework, variant: Variant) -> Self {
        Self { framework, variant }
    }

    /// Every framework/variant combination, framework-major
    pub fn all() -> impl Iterator<Item = TemplateDescriptor> {
        Framework::ALL.into_iter().flat_map(|framework| {
            Variant::ALL
                .into_iter()
                .map(move |variant| TemplateDescriptor::new(framework, variant))
        })
    }

    /// Comma-separated list of every valid identifier
    pub fn allowed_identifiers() -> String {
        Self::all()
            .map(|descriptor| descriptor.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.framework, self.variant)
    }
}

impl FromStr for TemplateDescriptor {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScaffoldError::InvalidTemplate {
            allowed: Self::allowed_identifiers(),
        };

        let (framework, variant) = s.split_once('-').ok_or_else(invalid)?;
        let framework = framework.parse().map_err(|_| invalid())?;
        let variant = variant.parse().map_err(|_| invalid())?;

        Ok(Self::new(framework, variant))
    }
}

/// Whether existing destination content may be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Yes,
    No,
}

/// Fully resolved answers for one run. Built once by the resolver, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Absolute, lexically normalised destination
    pub destination: PathBuf,
    pub template: TemplateDescriptor,
    /// Only meaningful when the destination already held non-excluded entries
    pub overwrite: Overwrite,
}

impl Selection {
    pub fn framework(&self) -> Framework {
        self.template.framework
    }

    pub fn variant(&self) -> Variant {
        self.template.variant
    }

    /// Final path segment of the destination, used as the manifest name
    pub fn project_name(&self) -> String {
        self.destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Either a finished value or a user-initiated cancellation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Resolve `input` against `cwd` and normalise `.` and `..` lexically
pub fn resolve_path(cwd: &Path, input: &Path) -> PathBuf {
    let joined = if input.is_absolute() {
        input.to_path_buf()
    } else {
        cwd.join(input)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// A destination is usable iff it resolves to a path with a base name whose
/// parent directory contains no `.` anywhere. The check runs on the resolved
/// form, so `./app` is judged by where it lands, not by how it was typed.
pub fn is_valid_path(cwd: &Path, input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }

    let resolved = resolve_path(cwd, Path::new(input));
    match (resolved.file_name(), resolved.parent()) {
        (Some(_), Some(parent)) => !parent.to_string_lossy().contains('.'),
        _ => false,
    }
}

/// clap value parser for the destination argument
pub fn parse_destination(input: &str) -> Result<PathBuf, ScaffoldError> {
    let cwd = std::env::current_dir().map_err(|_| ScaffoldError::InvalidPath(input.to_string()))?;
    if is_valid_path(&cwd, input) {
        Ok(PathBuf::from(input))
    } else {
        Err(ScaffoldError::InvalidPath(input.to_string()))
    }
}

/// clap value parser for the `--template` option
pub fn parse_template(input: &str) -> Result<TemplateDescriptor, ScaffoldError> {
    input.parse()
}
