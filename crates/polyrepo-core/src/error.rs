//! Error types for scaffolding runs
//!
//! `ScaffoldError` names the step that failed. The lower-level `CommandError`
//! and `RemoteError` describe what went wrong in the external collaborator.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of an external process (git, the package manager, the rename tool)
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}{}", format_stderr(.stderr))]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Failure of a call to the repository hosting API
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RemoteError {
    /// HTTP status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that stop a scaffolding run
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("rename tool `{tool}` is not available: {reason}")]
    Preflight { tool: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to clone {url} into {}", .dest.display())]
    Clone {
        url: String,
        dest: PathBuf,
        #[source]
        source: CommandError,
    },

    #[error("failed to create remote repository `{name}`")]
    RemoteCreation {
        name: String,
        #[source]
        source: RemoteError,
    },

    #[error("failed to link {url} at {path}")]
    Link {
        url: String,
        path: String,
        #[source]
        source: CommandError,
    },

    #[error("failed to copy {} to {}: {reason}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("dependency installation failed in {}", .dir.display())]
    DependencyInstall {
        dir: PathBuf,
        #[source]
        source: CommandError,
    },

    #[error("failed to rename mobile project in {}", .dir.display())]
    Rename {
        dir: PathBuf,
        #[source]
        source: CommandError,
    },

    #[error("failed to commit in {}", .dir.display())]
    Commit {
        dir: PathBuf,
        #[source]
        source: CommandError,
    },

    #[error("failed to push {branch} from {}", .dir.display())]
    Push {
        dir: PathBuf,
        branch: String,
        #[source]
        source: CommandError,
    },
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
