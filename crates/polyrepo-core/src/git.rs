//! Version-control primitives backed by the `git` executable

use crate::error::CommandError;
use crate::runtime::process::CommandRunner;
use std::path::Path;

/// The git operations a scaffolding run needs
#[allow(async_fn_in_trait)]
pub trait VersionControl {
    /// Clone `url` into `dest`, optionally with all nested repositories
    async fn clone_repo(&self, url: &str, dest: &Path, recursive: bool)
        -> Result<(), CommandError>;

    /// Register `url` as a nested repository at `path` inside `repo_dir`
    async fn add_submodule(&self, repo_dir: &Path, url: &str, path: &str)
        -> Result<(), CommandError>;

    /// Stage every change in the working tree
    async fn stage_all(&self, repo_dir: &Path) -> Result<(), CommandError>;

    async fn commit(&self, repo_dir: &Path, message: &str) -> Result<(), CommandError>;

    async fn push(&self, repo_dir: &Path, remote: &str, branch: &str) -> Result<(), CommandError>;
}

/// `VersionControl` implemented by invoking `git` through a `CommandRunner`
#[derive(Debug, Clone, Default)]
pub struct GitCli<R> {
    runner: R,
}

impl<R: CommandRunner> GitCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn git(&self, cwd: &Path, args: &[&str]) -> Result<(), CommandError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run("git", &args, cwd).await
    }
}

impl<R: CommandRunner> VersionControl for GitCli<R> {
    async fn clone_repo(
        &self,
        url: &str,
        dest: &Path,
        recursive: bool,
    ) -> Result<(), CommandError> {
        // git runs inside the parent, so it only gets the last component
        let (parent, target) = match (dest.parent(), dest.file_name()) {
            (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
                (parent, Path::new(name))
            }
            _ => (Path::new("."), dest),
        };
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| CommandError::Spawn {
                program: "git".to_string(),
                source,
            })?;

        let target = target.to_string_lossy().into_owned();
        let mut args = vec!["clone"];
        if recursive {
            args.push("--recursive");
        }
        args.push(url);
        args.push(target.as_str());
        self.git(parent, &args).await
    }

    async fn add_submodule(
        &self,
        repo_dir: &Path,
        url: &str,
        path: &str,
    ) -> Result<(), CommandError> {
        self.git(repo_dir, &["submodule", "add", url, path]).await
    }

    async fn stage_all(&self, repo_dir: &Path) -> Result<(), CommandError> {
        self.git(repo_dir, &["add", "--all"]).await
    }

    async fn commit(&self, repo_dir: &Path, message: &str) -> Result<(), CommandError> {
        self.git(repo_dir, &["commit", "-m", message]).await
    }

    async fn push(&self, repo_dir: &Path, remote: &str, branch: &str) -> Result<(), CommandError> {
        self.git(repo_dir, &["push", remote, branch]).await
    }
}
