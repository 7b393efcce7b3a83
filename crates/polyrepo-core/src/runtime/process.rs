//! External process execution
//!
//! Every external program (git, the package manager, the rename tool) goes
//! through a `CommandRunner`, so the workflow can be driven by a fake in tests.

use crate::error::CommandError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs a program to completion in a working directory
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), CommandError>;
}

/// Runs programs on the host with captured output
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), CommandError> {
        let command = display_command(program, args);
        debug!(command = %command, cwd = %cwd.display(), "running");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            debug!(command = %command, "finished");
            Ok(())
        } else {
            Err(CommandError::Failed {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Render a command line for logs and error messages
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
