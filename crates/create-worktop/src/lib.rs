//! create-worktop - project scaffolding for worktop applications

use clap::Parser;
use scaffolder_core::{
    resolve_template_dir, Environment, Options, ProductConfig, Scaffolder, SetupSummary,
};
use std::path::{Path, PathBuf};

/// worktop product configuration
#[derive(Clone)]
pub struct WorktopConfig;

impl ProductConfig for WorktopConfig {
    fn display_name(&self) -> &'static str {
        "worktop"
    }

    fn build_package(&self) -> &'static str {
        "worktop.build"
    }

    fn build_command(&self) -> &'static str {
        "worktop build"
    }

    fn default_template_dir(&self) -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/template"))
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_WORKTOP_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/lukeed/worktop"
    }

    fn next_steps(&self, dir: &Path, summary: &SetupSummary) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|c| dir.strip_prefix(c).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        // Step 2: Install dependencies and build
        steps.push("npm install".to_string());
        steps.push("npm run build".to_string());

        // Step 3: Deploy or run, depending on the runtime
        match summary.combination.env() {
            Environment::Cfw => steps.push("npx wrangler publish".to_string()),
            Environment::Deno => steps.push("deno run --allow-net build/index.js".to_string()),
            Environment::Node => steps.push("node build/index.js".to_string()),
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-worktop")]
#[command(about = "CLI for scaffolding worktop projects")]
#[command(version)]
pub struct Args {
    /// Project directory to create
    #[arg(value_name = "DIR")]
    pub directory: String,

    /// Target runtime (cfw, deno, node)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output module format (esm, sw, cjs)
    #[arg(long)]
    pub format: Option<String>,

    /// Generate a TypeScript entry point
    #[arg(long, visible_alias = "ts")]
    pub typescript: bool,

    /// Overwrite the directory if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Directory to create the project in (defaults to the current directory)
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Local directory to use for templates instead of the packaged ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<&Args> for Options {
    fn from(args: &Args) -> Self {
        Options {
            cwd: args.cwd.clone(),
            force: args.force,
            typescript: args.typescript,
            env: args.env.clone(),
            format: args.format.clone(),
        }
    }
}

pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}

/// Scaffold the project described by `args`
pub async fn run(args: &Args) -> scaffolder_core::Result<SetupSummary> {
    let config = WorktopConfig;
    let template_dir = resolve_template_dir(&config, args.template_dir.as_deref());
    log::debug!("Using templates from {}", template_dir.display());

    Scaffolder::new(config, template_dir)
        .setup(&args.directory, &Options::from(args))
        .await
}
