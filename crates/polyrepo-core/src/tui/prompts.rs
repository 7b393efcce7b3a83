//! Charm-style CLI prompts using cliclack

use crate::config::{RemoteConfig, Settings};
use crate::git::GitCli;
use crate::paths::PathResolver;
use crate::progress::Progress;
use crate::remote::GitHubClient;
use crate::runtime::{check, process::SystemRunner, tool};
use crate::selection::{validate_name, ProjectSelection};
use crate::variants::Variant;
use crate::workflow::{RemoteSession, RunReport, Scaffolder};
use crate::USER_AGENT;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Settings file to use instead of `polyrepo.yaml`
    pub config: Option<PathBuf>,

    /// Project name
    pub name: Option<String>,

    /// Variants to create (prompt keys or aliases)
    pub variants: Option<Vec<String>>,

    /// Skip the react-native-rename installation check
    pub skip_rename_check: bool,

    /// Never delete existing remote repositories
    pub keep_existing: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

type Scaffold = Scaffolder<GitCli<SystemRunner>, GitHubClient, SystemRunner>;

/// Run the CLI with interactive prompts.
///
/// Preflight and configuration failures are returned as errors. Once the run
/// has started, failures are carried in the returned report.
pub async fn run(args: CreateArgs) -> Result<RunReport> {
    cliclack::intro("create-polyrepo")?;

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Step 1: Load settings and resolve the remote target
    let mut settings = Settings::load(args.config.as_deref(), &cwd)?;
    let remote = resolve_remote().await?;

    // Step 2: Make sure the rename tool is available before anything is written
    if args.skip_rename_check {
        cliclack::log::info("Skipping react-native-rename check")?;
    } else {
        handle_tool_check(&args).await?;
    }

    if let Some(session) = &remote {
        if settings.replace_existing && !args.keep_existing {
            settings.replace_existing = confirm_replace(&session.target.owner, &args)?;
        } else {
            settings.replace_existing = false;
        }
    }

    // Step 3: Reset the staging area
    let paths = PathResolver::new(&cwd, &settings.output_dir);
    let scaffolder: Scaffold = Scaffolder::new(
        settings,
        paths,
        GitCli::new(SystemRunner),
        SystemRunner,
        remote,
    );
    scaffolder.prepare_staging().await;

    // Step 4: Collect the selection
    let name = select_name(&args)?;
    let variants = select_variants(&args)?;
    let selection = ProjectSelection::new(&name, variants)?;

    // Step 5: Check runtimes
    check_runtimes(&scaffolder, &selection)?;

    // Step 6: Create the project
    let project_dir = scaffolder.paths().project_dir(selection.name());
    let project_dir = project_dir
        .strip_prefix(&cwd)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| project_dir.clone());
    let package_manager = scaffolder.settings().package_manager.clone();
    let report = create_project(scaffolder, &selection).await?;

    // Step 7: Show next steps
    if report.is_success() {
        print_next_steps(&project_dir, &package_manager, &selection)?;
    }

    Ok(report)
}

async fn resolve_remote() -> Result<Option<RemoteSession<GitHubClient>>> {
    let Some(config) = RemoteConfig::from_env() else {
        cliclack::log::info("GITHUB_URL and GITHUB_TOKEN are not set, creating the project locally")?;
        info!("remote mode disabled");
        return Ok(None);
    };

    let lookup = GitHubClient::new(config.api_base()?, config.token.clone(), USER_AGENT)?;
    let target = config.resolve(&lookup).await?;
    cliclack::log::info(format!("Publishing repositories to {}", target.web_url))?;

    let host = GitHubClient::for_target(&target, USER_AGENT)?;
    Ok(Some(RemoteSession { target, host }))
}

async fn handle_tool_check(args: &CreateArgs) -> Result<()> {
    let tool = tool::rename_tool();

    if let Some(version) = tool.detect() {
        cliclack::log::success(format!("{} installed ({})", tool.binary, version))?;
        return Ok(());
    }

    cliclack::log::warning(format!("{} is not installed", tool.binary))?;

    let action: &str = if args.yes {
        "install"
    } else {
        cliclack::select("What would you like to do?")
            .item("install", format!("Install {} automatically", tool.binary), "")
            .item("docs", format!("Open documentation ({})", tool.docs_url), "")
            .item("cancel", "Cancel", "")
            .interact()?
    };

    match action {
        "install" => {
            cliclack::log::info(format!("This will execute: {}", tool.install_command()))?;

            let confirm = args.yes
                || cliclack::confirm("Proceed with installation?")
                    .initial_value(true)
                    .interact()?;
            if !confirm {
                return Err(tool.unavailable("installation declined").into());
            }

            let version = tool.install().await?;
            cliclack::log::success(format!("{} {} installed", tool.binary, version))?;
            Ok(())
        }
        "docs" => {
            if let Err(e) = tool.open_docs() {
                cliclack::log::warning(format!("Could not open a browser: {}", e))?;
            }
            Err(tool
                .unavailable(format!(
                    "install it with `{}` and run this command again",
                    tool.install_command()
                ))
                .into())
        }
        _ => Err(tool.unavailable("setup cancelled").into()),
    }
}

fn confirm_replace(owner: &str, args: &CreateArgs) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }

    let replace: bool = cliclack::confirm(format!(
        "Delete existing repositories under {} that have the same names?",
        owner
    ))
    .initial_value(true)
    .interact()?;

    if !replace {
        cliclack::log::info("Keeping existing repositories; creation fails if a name is taken")?;
    }
    Ok(replace)
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        cliclack::log::info(format!("Project name: {}", name))?;
        return Ok(name.clone());
    }

    let name: String = cliclack::input("Project name")
        .placeholder("my-app")
        .validate(|input: &String| validate_name(input))
        .interact()?;

    Ok(name)
}

fn select_variants(args: &CreateArgs) -> Result<Vec<Variant>> {
    let mut selected = Vec::new();

    if let Some(names) = &args.variants {
        for name in names {
            match Variant::parse(name) {
                Some(variant) => selected.push(variant),
                None => cliclack::log::warning(format!("Unknown variant: {}", name))?,
            }
        }
    } else if args.yes {
        selected.extend(Variant::ALL);
    } else {
        let mut multi = cliclack::multiselect("Select platforms");
        for variant in Variant::ALL {
            multi = multi.item(variant, variant.display_name(), variant.subpath());
        }
        selected = multi.required(false).interact()?;
    }

    if selected.is_empty() {
        cliclack::log::warning("No platforms selected")?;
    } else {
        let names: Vec<&str> = selected.iter().map(Variant::display_name).collect();
        cliclack::log::success(format!("Platforms: {}", names.join(", ")))?;
    }

    Ok(selected)
}

fn check_runtimes(scaffolder: &Scaffold, selection: &ProjectSelection) -> Result<()> {
    let variants: Vec<Variant> = selection.variants().collect();

    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes(&scaffolder.settings().package_manager, &variants) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing programs and try again.");
        }
    }
}

async fn create_project(scaffolder: Scaffold, selection: &ProjectSelection) -> Result<RunReport> {
    let spinner = Rc::new(cliclack::spinner());
    spinner.start(format!("Creating {} ({} mode)...", selection.name(), scaffolder.mode()));

    let listener = Rc::clone(&spinner);
    let scaffolder = scaffolder.with_progress(Progress::new(move |step| {
        listener.set_message(step);
    }));

    let report = scaffolder.run(selection).await;

    match &report.failure {
        None => spinner.stop(format!(
            "Created {}",
            scaffolder.paths().project_dir(selection.name()).display()
        )),
        Some(e) => spinner.error(format!("{}", e)),
    }

    for line in report.summary_lines() {
        if report.is_success() {
            cliclack::log::info(line)?;
        } else {
            cliclack::log::remark(line)?;
        }
    }

    if !report.is_success() {
        cliclack::outro_cancel("Project creation stopped. Repositories already created were kept.")?;
    }

    Ok(report)
}

fn next_steps(project_dir: &Path, package_manager: &str, selection: &ProjectSelection) -> Vec<String> {
    let mut steps = vec![format!("cd {}", project_dir.display())];
    for variant in selection.variants() {
        steps.push(format!(
            "{}: cd {} && {} start",
            variant.display_name(),
            variant.subpath(),
            package_manager
        ));
    }
    steps.push("Open README.md to get started".to_string());
    steps
}

fn print_next_steps(
    project_dir: &Path,
    package_manager: &str,
    selection: &ProjectSelection,
) -> Result<()> {
    let steps = next_steps(project_dir, package_manager, selection);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
