//! create-polyrepo - scaffold web, mobile and server projects as linked repositories

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyrepo_core::tui::CreateArgs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding the log filter
const LOG_ENV: &str = "POLYREPO_LOG";

/// File in the working directory that may hold GITHUB_URL / GITHUB_TOKEN
const ENV_FILE: &str = ".env";

#[derive(Parser, Debug)]
#[command(name = "create-polyrepo")]
#[command(about = "CLI for scaffolding web, mobile and server projects as linked repositories")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CliCreateArgs {
    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Platforms to include (comma-separated: react,reactNative,parseServer or web,mobile,backend)
    #[arg(long, value_delimiter = ',')]
    pub variants: Option<Vec<String>>,

    /// Settings file (defaults to polyrepo.yaml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Skip the react-native-rename installation check
    #[arg(long = "skip-rename-check")]
    pub skip_rename_check: bool,

    /// Never delete existing remote repositories with the same names
    #[arg(long = "keep-existing")]
    pub keep_existing: bool,

    /// Log diagnostics at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            config: args.config,
            name: args.name,
            variants: args.variants,
            skip_rename_check: args.skip_rename_check,
            keep_existing: args.keep_existing,
            yes: args.yes,
        }
    }
}

/// Load `dir/.env` into the process environment. Variables already set win.
fn load_env_file(dir: &Path) -> Result<Option<PathBuf>> {
    let path = dir.join(ENV_FILE);
    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
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

    let args = Args::parse();

    // No subcommand provided, default to create behavior
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args,
        None => args.create,
    };

    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let env_file = load_env_file(&cwd)?;
    init_tracing(create_args.verbose);
    if let Some(path) = env_file {
        debug!(path = %path.display(), "loaded environment file");
    }

    let result = polyrepo_core::run(create_args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    let report = result?;
    if let Some(failure) = &report.failure {
        error!(error = %failure, "run failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
