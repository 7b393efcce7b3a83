//! Platform variants (web, mobile, backend)
//!
//! Each variant owns one fixed slice of the template. The operations here are
//! the same for all three; the per-variant modules hold the differences
//! (post-processing and extra linked repositories).

pub mod backend;
pub mod mobile;
pub mod web;

use crate::config::{RemoteTarget, Settings};
use crate::error::{Result, ScaffoldError};
use crate::git::VersionControl;
use crate::paths::PathResolver;
use crate::progress::Progress;
use crate::remote::{Account, RemoteHost};
use crate::runtime::process::CommandRunner;
use crate::templates::copy_tree;
use std::fmt;
use std::path::{Path, PathBuf};

/// A platform target. Declaration order is the processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    Web,
    Mobile,
    Backend,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Web, Variant::Mobile, Variant::Backend];

    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Web => "React",
            Variant::Mobile => "React Native",
            Variant::Backend => "Parse Server",
        }
    }

    /// Key used by the selection prompt and `--variants`
    pub fn key(&self) -> &'static str {
        match self {
            Variant::Web => "react",
            Variant::Mobile => "reactNative",
            Variant::Backend => "parseServer",
        }
    }

    /// Parse a selection key or alias, case-insensitively
    pub fn parse(s: &str) -> Option<Variant> {
        match s.trim().to_lowercase().as_str() {
            "react" | "web" => Some(Variant::Web),
            "reactnative" | "react-native" | "rn" | "mobile" => Some(Variant::Mobile),
            "parseserver" | "parse-server" | "server" | "backend" => Some(Variant::Backend),
            _ => None,
        }
    }

    /// Slice of the template (and of the umbrella project) owned by this variant
    pub fn subpath(&self) -> &'static str {
        match self {
            Variant::Web => web::SUBPATH,
            Variant::Mobile => mobile::SUBPATH,
            Variant::Backend => backend::SUBPATH,
        }
    }

    pub fn repo_suffix(&self) -> &'static str {
        match self {
            Variant::Web => web::REPO_SUFFIX,
            Variant::Mobile => mobile::REPO_SUFFIX,
            Variant::Backend => backend::REPO_SUFFIX,
        }
    }

    /// Name of this variant's dedicated remote repository
    pub fn repo_name(&self, project: &str) -> String {
        format!("{}-{}", project, self.repo_suffix())
    }

    /// Fixed repositories linked next to this variant in remote mode
    pub fn extra_links(&self, settings: &Settings) -> Vec<LinkedRepo> {
        match self {
            Variant::Mobile => mobile::extra_links(settings),
            Variant::Web | Variant::Backend => Vec::new(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A repository linked into the umbrella project at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedRepo {
    pub url: String,
    pub path: String,
}

/// Last state a variant reached. Any failure leaves it at its last
/// successful state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Pending,
    RemoteCreated,
    Linked,
    Materialized,
    PostProcessed,
    Published,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Pending => "pending",
            Stage::RemoteCreated => "remote created",
            Stage::Linked => "linked",
            Stage::Materialized => "materialized",
            Stage::PostProcessed => "post-processed",
            Stage::Published => "published",
        };
        write!(f, "{}", name)
    }
}

/// Everything a variant operation needs, passed explicitly
pub struct VariantContext<'a, G, P> {
    pub settings: &'a Settings,
    pub paths: &'a PathResolver,
    pub git: &'a G,
    pub runner: &'a P,
    pub staging: &'a Path,
    pub progress: &'a Progress,
}

/// Remote-mode collaborators for `publish_remote`
pub struct RemoteContext<'a, H> {
    pub host: &'a H,
    pub target: &'a RemoteTarget,
    pub account: &'a Account,
    pub umbrella_dir: &'a Path,
}

impl<G: VersionControl, P: CommandRunner> VariantContext<'_, G, P> {
    /// Copy this variant's template slice into the output tree
    pub async fn materialize_local(&self, variant: Variant, project: &str) -> Result<PathBuf> {
        let source = self.staging.join(variant.subpath());
        let target = self.paths.project_subdir(project, variant.subpath());
        self.progress
            .step(&format!("Copying {} files to {}", variant, target.display()));
        copy_tree(&source, &target).await?;
        Ok(target)
    }

    /// Variant-specific processing after the copy and before any publishing
    pub async fn post_process(&self, variant: Variant, project: &str, dir: &Path) -> Result<()> {
        match variant {
            Variant::Web => web::post_process(self, dir).await,
            Variant::Mobile => mobile::post_process(self, project, dir).await,
            Variant::Backend => backend::post_process(self, dir).await,
        }
    }

    /// Local-mode setup: copy, then post-process
    pub async fn setup_local(
        &self,
        variant: Variant,
        project: &str,
        stage: &mut Stage,
    ) -> Result<()> {
        let dir = self.materialize_local(variant, project).await?;
        *stage = Stage::Materialized;
        self.post_process(variant, project, &dir).await?;
        *stage = Stage::PostProcessed;
        Ok(())
    }

    /// Remote-mode setup. The order is fixed: the repository must exist before
    /// it is linked, the link before files are copied into it, and the copy
    /// before the commit.
    pub async fn publish_remote<H: RemoteHost>(
        &self,
        remote: &RemoteContext<'_, H>,
        variant: Variant,
        project: &str,
        stage: &mut Stage,
    ) -> Result<()> {
        let repo = variant.repo_name(project);

        self.progress
            .step(&format!("Creating repository {}/{}", remote.account.owner, repo));
        remote
            .host
            .create_repository(remote.account, &repo)
            .await
            .map_err(|source| ScaffoldError::RemoteCreation {
                name: repo.clone(),
                source,
            })?;
        *stage = Stage::RemoteCreated;

        let mut links = vec![LinkedRepo {
            url: remote.target.repo_url(&repo),
            path: variant.subpath().to_string(),
        }];
        links.extend(variant.extra_links(self.settings));
        for link in &links {
            self.link(remote.umbrella_dir, link).await?;
        }
        *stage = Stage::Linked;

        let dir = self.materialize_local(variant, project).await?;
        *stage = Stage::Materialized;

        self.post_process(variant, project, &dir).await?;
        *stage = Stage::PostProcessed;

        self.publish(&dir, &self.settings.variant_commit_message)
            .await?;
        *stage = Stage::Published;
        Ok(())
    }

    async fn link(&self, umbrella_dir: &Path, link: &LinkedRepo) -> Result<()> {
        self.progress
            .step(&format!("Linking {} at {}", link.url, link.path));
        self.git
            .add_submodule(umbrella_dir, &link.url, &link.path)
            .await
            .map_err(|source| ScaffoldError::Link {
                url: link.url.clone(),
                path: link.path.clone(),
                source,
            })
    }

    /// Stage, commit and push a repository to the default branch
    pub async fn publish(&self, dir: &Path, message: &str) -> Result<()> {
        let branch = &self.settings.default_branch;
        self.progress
            .step(&format!("Publishing {} to {}", dir.display(), branch));

        let commit_error = |source| ScaffoldError::Commit {
            dir: dir.to_path_buf(),
            source,
        };
        self.git.stage_all(dir).await.map_err(commit_error)?;
        self.git.commit(dir, message).await.map_err(commit_error)?;
        self.git
            .push(dir, "origin", branch)
            .await
            .map_err(|source| ScaffoldError::Push {
                dir: dir.to_path_buf(),
                branch: branch.clone(),
                source,
            })
    }

    /// Run the package manager in `dir`
    pub async fn install_dependencies(&self, dir: &Path) -> Result<()> {
        let program = &self.settings.package_manager;
        self.progress.step(&format!(
            "Installing dependencies with {} in {}",
            program,
            dir.display()
        ));
        self.runner
            .run(program, &[], dir)
            .await
            .map_err(|source| ScaffoldError::DependencyInstall {
                dir: dir.to_path_buf(),
                source,
            })
    }
}
