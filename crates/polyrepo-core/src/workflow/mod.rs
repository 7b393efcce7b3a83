//! End-to-end run coordination
//!
//! A run clones the template into the staging area, sets up each selected
//! variant in a fixed order, and in remote mode publishes the umbrella
//! repository last. Every step is awaited before the next one starts. The
//! first failure stops the run; nothing already created remotely is rolled
//! back. The staging area is removed on every exit path.

pub mod report;

use crate::config::{RemoteTarget, Settings};
use crate::error::ScaffoldError;
use crate::git::VersionControl;
use crate::paths::PathResolver;
use crate::progress::Progress;
use crate::remote::{Account, OwnerKind, RemoteHost};
use crate::runtime::process::CommandRunner;
use crate::selection::ProjectSelection;
use crate::variants::{RemoteContext, Stage, Variant, VariantContext};
use crate::{staging, templates};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub use report::{Mode, RunReport, VariantReport};

/// Remote endpoint plus the client used to talk to it
pub struct RemoteSession<H> {
    pub target: RemoteTarget,
    pub host: H,
}

/// Drives a scaffolding run with explicit collaborators
pub struct Scaffolder<G, H, P> {
    settings: Settings,
    paths: PathResolver,
    git: G,
    runner: P,
    remote: Option<RemoteSession<H>>,
    progress: Progress,
}

impl<G, H, P> Scaffolder<G, H, P>
where
    G: VersionControl,
    H: RemoteHost,
    P: CommandRunner,
{
    /// `remote: None` selects local-only mode
    pub fn new(
        settings: Settings,
        paths: PathResolver,
        git: G,
        runner: P,
        remote: Option<RemoteSession<H>>,
    ) -> Self {
        Self {
            settings,
            paths,
            git,
            runner,
            remote,
            progress: Progress::default(),
        }
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn mode(&self) -> Mode {
        if self.remote.is_some() {
            Mode::Remote
        } else {
            Mode::Local
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.paths.resolve(&self.settings.staging_dir)
    }

    /// Remove a staging area left behind by an interrupted run
    pub async fn prepare_staging(&self) {
        staging::ensure_clean(&self.staging_dir()).await;
    }

    /// Run the workflow for `selection`. Failures are reported, not returned.
    pub async fn run(&self, selection: &ProjectSelection) -> RunReport {
        let staging_dir = self.staging_dir();
        let mut report = RunReport::new(self.mode(), selection.variants());

        self.execute(selection, &staging_dir, &mut report).await;

        staging::remove(&staging_dir).await;
        report
    }

    async fn execute(&self, selection: &ProjectSelection, staging_dir: &Path, report: &mut RunReport) {
        self.progress.step("Cloning template repository");
        if let Err(e) =
            templates::fetch_template(&self.git, &self.settings.template_url, staging_dir).await
        {
            report.fail(None, e);
            return;
        }

        let ctx = VariantContext {
            settings: &self.settings,
            paths: &self.paths,
            git: &self.git,
            runner: &self.runner,
            staging: staging_dir,
            progress: &self.progress,
        };

        match &self.remote {
            None => self.run_local(&ctx, selection, report).await,
            Some(session) => self.run_remote(&ctx, session, selection, report).await,
        }
    }

    async fn run_local(
        &self,
        ctx: &VariantContext<'_, G, P>,
        selection: &ProjectSelection,
        report: &mut RunReport,
    ) {
        self.progress.step("No remote configured, creating project locally");
        for variant in selection.variants() {
            let mut stage = Stage::Pending;
            let result = ctx.setup_local(variant, selection.name(), &mut stage).await;
            if !record(report, variant, stage, result) {
                return;
            }
        }
    }

    async fn run_remote(
        &self,
        ctx: &VariantContext<'_, G, P>,
        session: &RemoteSession<H>,
        selection: &ProjectSelection,
        report: &mut RunReport,
    ) {
        let name = selection.name();
        let account = self.classify_owner(session).await;

        if self.settings.replace_existing {
            self.delete_collisions(session, selection).await;
        }

        self.progress
            .step(&format!("Creating repository {}/{}", account.owner, name));
        if let Err(source) = session.host.create_repository(&account, name).await {
            report.fail(
                None,
                ScaffoldError::RemoteCreation {
                    name: name.to_string(),
                    source,
                },
            );
            return;
        }

        let umbrella_url = session.target.repo_url(name);
        let umbrella_dir = self.paths.project_dir(name);
        self.progress
            .step(&format!("Cloning {} into {}", umbrella_url, umbrella_dir.display()));
        if let Err(source) = self.git.clone_repo(&umbrella_url, &umbrella_dir, false).await {
            report.fail(
                None,
                ScaffoldError::Clone {
                    url: umbrella_url,
                    dest: umbrella_dir,
                    source,
                },
            );
            return;
        }

        let remote = RemoteContext {
            host: &session.host,
            target: &session.target,
            account: &account,
            umbrella_dir: &umbrella_dir,
        };

        for variant in selection.variants() {
            let mut stage = Stage::Pending;
            let result = ctx
                .publish_remote(&remote, variant, name, &mut stage)
                .await;
            if !record(report, variant, stage, result) {
                return;
            }
        }

        if selection.is_empty() {
            self.progress
                .step("No variants selected, leaving the umbrella repository as created");
            return;
        }

        match ctx
            .publish(&umbrella_dir, &self.settings.umbrella_commit_message)
            .await
        {
            Ok(()) => report.umbrella_published = true,
            Err(e) => report.fail(None, e),
        }
    }

    /// A failed lookup means "not an organization"
    async fn classify_owner(&self, session: &RemoteSession<H>) -> Account {
        let owner = session.target.owner.clone();
        let kind = match session.host.is_organization(&owner).await {
            Ok(true) => OwnerKind::Organization,
            Ok(false) => OwnerKind::Individual,
            Err(e) => {
                debug!(owner = %owner, error = %e, "organization lookup failed, treating owner as a user account");
                OwnerKind::Individual
            }
        };
        self.progress
            .step(&format!("Creating repositories under {} {}", kind, owner));
        Account { owner, kind }
    }

    /// Delete repositories whose names this run is about to create.
    /// Each deletion is attempted; failures (usually "not found") are ignored.
    async fn delete_collisions(&self, session: &RemoteSession<H>, selection: &ProjectSelection) {
        self.progress.step("Removing existing repositories with the same names");
        let owner = &session.target.owner;
        for repo in selection.repository_names() {
            match session.host.delete_repository(owner, &repo).await {
                Ok(()) => warn!(owner = %owner, repo = %repo, "deleted existing repository"),
                Err(e) => debug!(owner = %owner, repo = %repo, error = %e, "repository not deleted"),
            }
        }
    }
}

/// Store a variant's outcome; returns false when the run must stop
fn record(
    report: &mut RunReport,
    variant: Variant,
    stage: Stage,
    result: Result<(), ScaffoldError>,
) -> bool {
    if let Some(entry) = report.variant_mut(variant) {
        entry.stage = stage;
    }
    match result {
        Ok(()) => true,
        Err(e) => {
            report.fail(Some(variant), e);
            false
        }
    }
}
