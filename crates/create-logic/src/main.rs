//! create-logic - Project scaffolding for state-machine starter apps

use anyhow::Result;
use clap::Parser;
use include_dir::{include_dir, Dir};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{parse_destination, parse_template, ProductConfig, Selection, TemplateDescriptor};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/../../templates");

/// Product configuration for the bundled state-machine templates
#[derive(Clone)]
pub struct LogicConfig;

impl ProductConfig for LogicConfig {
    fn name(&self) -> &'static str {
        "create-logic"
    }

    fn display_name(&self) -> &'static str {
        "create-logic"
    }

    fn default_project_name(&self) -> &'static str {
        "logic-simulator"
    }

    fn bundled_templates(&self) -> &'static Dir<'static> {
        &TEMPLATES
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_LOGIC_TEMPLATE_DIR"
    }

    fn next_steps(&self, dir: &Path, _selection: &Selection) -> Vec<String> {
        let mut steps = Vec::new();

        // Step 1: cd to directory unless it is the current one
        if !dir.as_os_str().is_empty() {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Install dependencies
        steps.push("npm install".to_string());

        // Step 3: Start dev server
        steps.push("npm run dev".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-logic")]
#[command(about = "Scaffold a state-machine starter project")]
#[command(version)]
pub struct Args {
    /// Project root directory
    #[arg(value_parser = parse_destination)]
    pub directory: Option<PathBuf>,

    /// Template to use: vanilla-js, vanilla-ts, react-js, react-ts
    #[arg(short, long, value_parser = parse_template)]
    pub template: Option<TemplateDescriptor>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Remove existing files in a non-empty project directory without asking
    #[arg(long)]
    pub overwrite: bool,

    /// Accept defaults for every question (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            directory: args.directory,
            overwrite: args.overwrite,
            yes: args.yes,
        }
    }
}

/// Diagnostics go to stderr and stay at `warn` unless RUST_LOG says otherwise
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    // Validation errors exit here, before any prompt is shown
    let args = Args::parse();
    init_tracing();

    let result = scaffolder_core::run(&LogicConfig, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
