//! Input resolution: merge command-line values with interactive answers
//!
//! Questions are asked in a fixed order (destination, overwrite, framework,
//! variant). Each one is skipped when its answer is already known from the
//! command line or when it does not apply. A cancelled question aborts the
//! whole resolution before anything on disk changes.

use crate::product::ProductConfig;
use crate::selection::{
    is_valid_path, resolve_path, Framework, Outcome, Overwrite, Selection, TemplateDescriptor,
    Variant,
};
use crate::templates::guard;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Validation callback for free-text answers; `Err` carries the message shown
/// while the prompt stays open
pub type Validator = Box<dyn Fn(&str) -> Result<(), String>>;

/// One option of a select question
#[derive(Debug, Clone)]
pub struct Choice<T> {
    pub value: T,
    pub label: String,
}

impl<T> Choice<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// The interactive prompt renderer.
///
/// Implementations re-ask a text question until `validate` accepts the
/// answer, and report user aborts as [`Outcome::Cancelled`].
pub trait Prompter {
    /// Free-text question, pre-filled with `default`
    fn input(&mut self, message: &str, default: &str, validate: Validator)
        -> Result<Outcome<String>>;

    /// Single choice among `choices`; the first choice is the default
    fn select<T: Clone + Eq + 'static>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
    ) -> Result<Outcome<T>>;
}

/// Values known before any question is asked, built once from the command line
#[derive(Debug, Clone, Default)]
pub struct ResolveInputs {
    /// Directory relative paths are resolved against
    pub cwd: PathBuf,
    /// Destination given as a positional argument, already validated
    pub destination: Option<PathBuf>,
    /// Template given with `--template`, already validated
    pub template: Option<TemplateDescriptor>,
    /// `--overwrite`: consent to clearing a non-empty destination
    pub overwrite: bool,
    /// `--yes`: take defaults instead of asking
    pub assume_defaults: bool,
}

macro_rules! answer {
    ($outcome:expr) => {
        match $outcome {
            Outcome::Completed(value) => value,
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        }
    };
}

/// Resolve a complete [`Selection`], or report that the user cancelled
pub async fn resolve<C: ProductConfig, P: Prompter>(
    config: &C,
    inputs: &ResolveInputs,
    prompter: &mut P,
) -> Result<Outcome<Selection>> {
    // Step 1: destination
    let destination = match &inputs.destination {
        Some(dir) => resolve_path(&inputs.cwd, dir),
        None if inputs.assume_defaults => {
            resolve_path(&inputs.cwd, Path::new(config.default_project_name()))
        }
        None => {
            let cwd = inputs.cwd.clone();
            let validate: Validator = Box::new(move |value: &str| {
                if is_valid_path(&cwd, value) {
                    Ok(())
                } else {
                    Err("invalid project name".to_string())
                }
            });
            let name = answer!(prompter.input(
                "Project name:",
                config.default_project_name(),
                validate
            )?);
            resolve_path(&inputs.cwd, Path::new(name.trim()))
        }
    };

    // Step 2: overwrite, only when the destination holds something we'd remove
    let overwrite = if !guard::needs_overwrite(&destination, config.excluded_entries()).await? {
        Overwrite::No
    } else if inputs.overwrite {
        Overwrite::Yes
    } else if inputs.assume_defaults {
        tracing::warn!(
            "{} is not empty; pass --overwrite to remove its contents",
            destination.display()
        );
        return Ok(Outcome::Cancelled);
    } else {
        let message = format!(
            "{} is not empty. Remove existing files and continue?",
            describe_target(&inputs.cwd, &destination)
        );
        let choices = [
            Choice::new(Overwrite::Yes, "Remove existing files and continue"),
            Choice::new(Overwrite::No, "Cancel operation"),
        ];
        match answer!(prompter.select(&message, &choices)?) {
            Overwrite::Yes => Overwrite::Yes,
            Overwrite::No => return Ok(Outcome::Cancelled),
        }
    };

    // Steps 3 and 4: framework, then variant
    let template = match inputs.template {
        Some(template) => template,
        None if inputs.assume_defaults => {
            TemplateDescriptor::new(Framework::ALL[0], Variant::ALL[0])
        }
        None => {
            let framework = answer!(prompter.select("Select a framework", &framework_choices())?);
            let variant = answer!(prompter.select("Select a variant", &variant_choices())?);
            TemplateDescriptor::new(framework, variant)
        }
    };

    Ok(Outcome::Completed(Selection {
        destination,
        template,
        overwrite,
    }))
}

fn describe_target(cwd: &Path, destination: &Path) -> String {
    if destination == cwd {
        "Current directory".to_string()
    } else {
        let name = destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| destination.display().to_string());
        format!("Target directory \"{}\"", name)
    }
}

fn framework_choices() -> Vec<Choice<Framework>> {
    Framework::ALL
        .into_iter()
        .map(|framework| {
            let label = match framework {
                Framework::Vanilla => framework.display_name().yellow(),
                Framework::React => framework.display_name().blue(),
            };
            Choice::new(framework, label.to_string())
        })
        .collect()
}

fn variant_choices() -> Vec<Choice<Variant>> {
    Variant::ALL
        .into_iter()
        .map(|variant| {
            let label = match variant {
                Variant::Js => variant.display_name().yellow(),
                Variant::Ts => variant.display_name().blue(),
            };
            Choice::new(variant, label.to_string())
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// A scripted answer
    #[derive(Debug, Clone)]
    pub enum Reply {
        Text(&'static str),
        Pick(usize),
        Cancel,
    }

    /// Replays scripted replies and records every question asked
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        replies: VecDeque<Reply>,
        pub asked: Vec<String>,
        pub rejected: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: replies.into_iter().collect(),
                ..Self::default()
            }
        }

        fn next(&mut self) -> Reply {
            self.replies.pop_front().expect("prompter ran out of replies")
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(
            &mut self,
            message: &str,
            _default: &str,
            validate: Validator,
        ) -> Result<Outcome<String>> {
            self.asked.push(message.to_string());
            loop {
                match self.next() {
                    Reply::Text(text) => match validate(text) {
                        Ok(()) => return Ok(Outcome::Completed(text.to_string())),
                        Err(_) => self.rejected.push(text.to_string()),
                    },
                    Reply::Cancel => return Ok(Outcome::Cancelled),
                    Reply::Pick(_) => panic!("expected text reply for {message}"),
                }
            }
        }

        fn select<T: Clone + Eq + 'static>(
            &mut self,
            message: &str,
            choices: &[Choice<T>],
        ) -> Result<Outcome<T>> {
            self.asked.push(message.to_string());
            match self.next() {
                Reply::Pick(idx) => Ok(Outcome::Completed(choices[idx].value.clone())),
                Reply::Cancel => Ok(Outcome::Cancelled),
                Reply::Text(_) => panic!("expected pick reply for {message}"),
            }
        }
    }
}
