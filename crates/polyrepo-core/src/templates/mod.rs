//! Shared template repository handling
//!
//! The template is a single repository holding every platform slice. It is
//! cloned (with its nested repositories) into the staging area, and each
//! selected variant copies its slice out of that clone.

pub mod copier;

use crate::error::{Result, ScaffoldError};
use crate::git::VersionControl;
use std::path::Path;
use tracing::info;

pub use copier::copy_tree;

/// Clone the shared template into the staging area
pub async fn fetch_template<G: VersionControl>(git: &G, url: &str, staging: &Path) -> Result<()> {
    info!(url, staging = %staging.display(), "cloning template");
    git.clone_repo(url, staging, true)
        .await
        .map_err(|source| ScaffoldError::Clone {
            url: url.to_string(),
            dest: staging.to_path_buf(),
            source,
        })
}
