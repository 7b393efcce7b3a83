//! React web application

use super::VariantContext;
use crate::error::Result;
use crate::git::VersionControl;
use crate::runtime::process::CommandRunner;
use std::path::Path;

pub const SUBPATH: &str = "app/react/web";
pub const REPO_SUFFIX: &str = "react-app";

/// Install the web app's dependencies
pub async fn post_process<G: VersionControl, P: CommandRunner>(
    ctx: &VariantContext<'_, G, P>,
    dir: &Path,
) -> Result<()> {
    ctx.install_dependencies(dir).await
}
