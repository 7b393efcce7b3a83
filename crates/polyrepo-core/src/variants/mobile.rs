//! React Native application
//!
//! The template app is renamed to the project name before its dependencies
//! are installed, and a shared component library is linked beside it.

use super::{LinkedRepo, VariantContext};
use crate::config::Settings;
use crate::error::{Result, ScaffoldError};
use crate::git::VersionControl;
use crate::runtime::process::CommandRunner;
use std::path::Path;

pub const SUBPATH: &str = "app/rn/mobile";
pub const REPO_SUFFIX: &str = "rn-app";

/// Where the shared React Native library is linked in the umbrella project
pub const LIB_SUBPATH: &str = "app/rn/lib/lib-react-native";

/// External tool that rewrites app names and bundle identifiers
pub const RENAME_TOOL: &str = "react-native-rename";

/// Bundle identifier derived from the project name, e.g. `com.demo`
pub fn bundle_identifier(project: &str) -> String {
    format!("com.{}", project.to_lowercase())
}

/// Arguments passed to the rename tool
pub fn rename_args(project: &str) -> Vec<String> {
    vec![
        project.to_string(),
        "-b".to_string(),
        bundle_identifier(project),
        "--skipGitStatusCheck".to_string(),
    ]
}

pub fn extra_links(settings: &Settings) -> Vec<LinkedRepo> {
    vec![LinkedRepo {
        url: settings.lib_react_native_url.clone(),
        path: LIB_SUBPATH.to_string(),
    }]
}

/// Rename the app, then install its dependencies
pub async fn post_process<G: VersionControl, P: CommandRunner>(
    ctx: &VariantContext<'_, G, P>,
    project: &str,
    dir: &Path,
) -> Result<()> {
    ctx.progress.step(&format!(
        "Renaming React Native project to {} ({})",
        project,
        bundle_identifier(project)
    ));
    ctx.runner
        .run(RENAME_TOOL, &rename_args(project), dir)
        .await
        .map_err(|source| ScaffoldError::Rename {
            dir: dir.to_path_buf(),
            source,
        })?;

    ctx.install_dependencies(dir).await
}
