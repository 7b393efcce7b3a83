//! Preflight for the React Native rename tool
//!
//! The mobile variant shells out to `react-native-rename`, which is
//! distributed through npm. Its presence is checked before anything is
//! written; when missing it can be installed globally.

use super::check::{detect_program, RuntimeInfo};
use crate::error::ScaffoldError;
use crate::variants::mobile::RENAME_TOOL;
use colored::Colorize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// npm can be slow on a cold cache
const INSTALL_TIMEOUT: Duration = Duration::from_secs(180);

/// A command-line tool installed from the npm registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmTool {
    /// Binary looked up on PATH
    pub binary: &'static str,
    /// npm package providing the binary
    pub package: &'static str,
    pub docs_url: &'static str,
}

impl NpmTool {
    /// Version of the installed binary, if it runs
    pub fn detect(&self) -> Option<String> {
        let RuntimeInfo {
            available, version, ..
        } = detect_program(self.binary);
        available.then(|| version.unwrap_or_else(|| "unknown".to_string()))
    }

    pub fn install_args(&self) -> Vec<String> {
        vec![
            "install".to_string(),
            "-g".to_string(),
            self.package.to_string(),
        ]
    }

    pub fn install_command(&self) -> String {
        format!("npm {}", self.install_args().join(" "))
    }

    /// Preflight failure naming this tool
    pub fn unavailable(&self, reason: impl Into<String>) -> ScaffoldError {
        ScaffoldError::Preflight {
            tool: self.binary.to_string(),
            reason: reason.into(),
        }
    }

    /// Installed version, or a preflight error telling how to install it
    pub fn require(&self) -> Result<String, ScaffoldError> {
        self.detect().ok_or_else(|| {
            self.unavailable(format!(
                "not found on PATH; install it with `{}`",
                self.install_command()
            ))
        })
    }

    /// Install globally with npm, echoing npm's output. Succeeds only if the
    /// binary runs afterwards.
    pub async fn install(&self) -> Result<String, ScaffoldError> {
        println!("{} {}", "Running:".dimmed(), self.install_command().yellow());

        let mut child = Command::new("npm")
            .args(self.install_args())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.unavailable(format!("failed to start npm: {}", e)))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let finished = timeout(INSTALL_TIMEOUT, async {
            tokio::join!(echo_lines(stdout, false), echo_lines(stderr, true));
            child.wait().await
        })
        .await;

        match finished {
            Err(_) => Err(self.unavailable(format!(
                "`{}` timed out after {} seconds",
                self.install_command(),
                INSTALL_TIMEOUT.as_secs()
            ))),
            Ok(Err(e)) => Err(self.unavailable(format!("npm did not finish: {}", e))),
            Ok(Ok(status)) if !status.success() => Err(self.unavailable(format!(
                "`{}` exited with code {}",
                self.install_command(),
                status.code().unwrap_or(-1)
            ))),
            Ok(Ok(_)) => self.detect().ok_or_else(|| {
                self.unavailable("npm finished but the binary is still not on PATH")
            }),
        }
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> std::io::Result<()> {
        debug!(url = self.docs_url, "opening documentation");
        open::that(self.docs_url)
    }
}

async fn echo_lines<R: AsyncRead + Unpin>(reader: Option<R>, is_stderr: bool) {
    let Some(reader) = reader else {
        return;
    };
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if is_stderr {
            eprintln!("  {}", line.yellow());
        } else {
            println!("  {}", line);
        }
    }
}

/// The tool the mobile variant renames projects with
pub fn rename_tool() -> NpmTool {
    NpmTool {
        binary: RENAME_TOOL,
        package: "react-native-rename",
        docs_url: "https://github.com/junedomingo/react-native-rename",
    }
}
