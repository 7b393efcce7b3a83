//! Polyrepo Core - scaffolding of web, mobile and server projects from one template
//!
//! A run clones a shared template repository into a staging area, carves out
//! one slice per selected platform variant, and either writes the slices to a
//! local output tree or publishes each one as its own repository linked into an
//! umbrella repository as a submodule.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Primitives** - git, the hosting API, process execution, file copy
//! - **Layer 2: Workflow Orchestration** - `Scaffolder` drives a run through explicit collaborators
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use polyrepo_core::{GitCli, PathResolver, ProjectSelection, Scaffolder, Settings, SystemRunner, Variant};
//! use polyrepo_core::remote::GitHubClient;
//!
//! let settings = Settings::default();
//! let paths = PathResolver::new(std::env::current_dir()?, &settings.output_dir);
//! let scaffolder: Scaffolder<_, GitHubClient, _> =
//!     Scaffolder::new(settings, paths, GitCli::new(SystemRunner), SystemRunner, None);
//!
//! let selection = ProjectSelection::new("myshop", [Variant::Web, Variant::Mobile])?;
//! let report = scaffolder.run(&selection).await;
//! ```

pub mod config;
pub mod error;
pub mod git;
pub mod paths;
pub mod progress;
pub mod remote;
pub mod runtime;
pub mod selection;
pub mod staging;
pub mod templates;
pub mod variants;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use config::{RemoteConfig, RemoteTarget, Settings};
pub use error::{CommandError, RemoteError, ScaffoldError};
pub use git::{GitCli, VersionControl};
pub use paths::PathResolver;
pub use progress::Progress;
pub use runtime::{check_runtimes, CommandRunner, RuntimeInfo, SystemRunner};
pub use selection::ProjectSelection;
pub use variants::{Stage, Variant};
pub use workflow::{Mode, RemoteSession, RunReport, Scaffolder};

#[cfg(feature = "tui")]
pub use tui::run;

/// User agent sent to the hosting API
pub const USER_AGENT: &str = concat!("create-polyrepo/", env!("CARGO_PKG_VERSION"));
