//! Staging area management
//!
//! The staging area holds the template clone for a single run. Removal is
//! best-effort: failures are logged and never stop the run.

use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Remove a stale staging directory before a run
pub async fn ensure_clean(path: &Path) {
    if fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "removing stale staging area");
        remove(path).await;
    }
}

/// Recursively delete the staging directory; absence is not an error
pub async fn remove(path: &Path) {
    match fs::remove_dir_all(path).await {
        Ok(()) => debug!(path = %path.display(), "staging area removed"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove staging area"),
    }
}
