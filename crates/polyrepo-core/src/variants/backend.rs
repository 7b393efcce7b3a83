//! Parse server

use super::VariantContext;
use crate::error::Result;
use crate::git::VersionControl;
use crate::runtime::process::CommandRunner;
use std::path::Path;

pub const SUBPATH: &str = "server/parse-b4a";
pub const REPO_SUFFIX: &str = "server";

/// The server keeps the template's identifiers; only dependencies are installed
pub async fn post_process<G: VersionControl, P: CommandRunner>(
    ctx: &VariantContext<'_, G, P>,
    dir: &Path,
) -> Result<()> {
    ctx.install_dependencies(dir).await
}
