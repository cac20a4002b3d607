//! Charm-style CLI prompts using cliclack

use crate::product::ProductConfig;
use crate::resolver::{self, Choice, Prompter, ResolveInputs, Validator};
use crate::scaffold::{self, ScaffoldReport};
use crate::selection::{Outcome, Selection, TemplateDescriptor};
use crate::templates::{TemplateSet, TemplateSource};
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Template to use, already validated
    pub template: Option<TemplateDescriptor>,

    /// Project directory to create, already validated
    pub directory: Option<PathBuf>,

    /// Consent to clearing a non-empty destination without asking
    pub overwrite: bool,

    /// Take defaults for every question (non-interactive mode)
    pub yes: bool,
}

/// [`Prompter`] backed by cliclack. Esc and Ctrl-C surface from cliclack as
/// `ErrorKind::Interrupted` and become [`Outcome::Cancelled`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CliclackPrompter;

fn interrupted<T>(result: io::Result<T>) -> Result<Outcome<T>> {
    match result {
        Ok(value) => Ok(Outcome::Completed(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Outcome::Cancelled),
        Err(e) => Err(e.into()),
    }
}

impl Prompter for CliclackPrompter {
    fn input(
        &mut self,
        message: &str,
        default: &str,
        validate: Validator,
    ) -> Result<Outcome<String>> {
        let answer: io::Result<String> = cliclack::input(message)
            .placeholder(default)
            .default_input(default)
            .validate(move |value: &String| validate(value.as_str()))
            .interact();
        interrupted(answer)
    }

    fn select<T: Clone + Eq + 'static>(
        &mut self,
        message: &str,
        choices: &[Choice<T>],
    ) -> Result<Outcome<T>> {
        let mut select = cliclack::select(message);
        for choice in choices {
            select = select.item(choice.value.clone(), &choice.label, "");
        }
        interrupted(select.interact())
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let cwd = std::env::current_dir()?;
    tracing::debug!(product = config.name(), cwd = %cwd.display(), "resolving inputs");
    let inputs = ResolveInputs {
        cwd: cwd.clone(),
        destination: args.directory,
        template: args.template,
        overwrite: args.overwrite,
        assume_defaults: args.yes,
    };

    // Step 1: Resolve destination, overwrite consent, and template
    let mut prompter = CliclackPrompter;
    let selection = match resolver::resolve(config, &inputs, &mut prompter).await? {
        Outcome::Completed(selection) => selection,
        Outcome::Cancelled => return cancelled(),
    };

    // Step 2: Locate templates
    let source = TemplateSource::from_config(config, args.template_dir);
    if let TemplateSource::Local(path) = &source {
        cliclack::log::info(format!("Using local templates from {}", path.display()))?;
    }
    let templates = TemplateSet::from_source(config, &source);

    // Step 3: Create project
    let report = match create_project(config, &templates, &selection).await? {
        Outcome::Completed(report) => report,
        Outcome::Cancelled => return cancelled(),
    };

    // Step 4: Show next steps
    print_next_steps(config, &cwd, &report, &selection)?;

    Ok(())
}

fn cancelled() -> Result<()> {
    cliclack::outro_cancel("Operation cancelled")?;
    Ok(())
}

async fn create_project<C: ProductConfig>(
    config: &C,
    templates: &TemplateSet,
    selection: &Selection,
) -> Result<Outcome<ScaffoldReport>> {
    let spinner = cliclack::spinner();
    spinner.start(format!("Scaffolding {} project...", selection.template));

    match scaffold::scaffold(config, templates, selection).await {
        Ok(Outcome::Completed(report)) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files.len(),
                report.project_dir.display()
            ));
            if !report.removed.is_empty() {
                cliclack::log::info(format!(
                    "Removed {} existing entries",
                    report.removed.len()
                ))?;
            }
            Ok(Outcome::Completed(report))
        }
        Ok(Outcome::Cancelled) => {
            spinner.stop("Nothing written");
            Ok(Outcome::Cancelled)
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            Err(e)
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    cwd: &Path,
    report: &ScaffoldReport,
    selection: &Selection,
) -> Result<()> {
    let dir = report
        .project_dir
        .strip_prefix(cwd)
        .unwrap_or(&report.project_dir);
    let steps = config.next_steps(dir, selection);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
