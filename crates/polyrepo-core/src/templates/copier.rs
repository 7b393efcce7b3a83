//! Template file copying with version-control metadata filtering

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::{DirEntry, WalkDir};

/// Name of the version-control metadata entry skipped at every depth
const VCS_METADATA: &str = ".git";

/// Copy a template slice into `target_dir`, merging with whatever is already
/// there. Existing files are overwritten; `.git` entries on either side are
/// left alone. Returns the copied files relative to `source_dir`.
pub async fn copy_tree(source_dir: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    let copy_error = |reason: String| ScaffoldError::Copy {
        from: source_dir.to_path_buf(),
        to: target_dir.to_path_buf(),
        reason,
    };

    if !source_dir.is_dir() {
        return Err(copy_error("source directory not found in template".to_string()));
    }

    fs::create_dir_all(target_dir)
        .await
        .map_err(|e| copy_error(format!("failed to create target directory: {}", e)))?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_vcs_metadata(e))
    {
        let entry = entry.map_err(|e| copy_error(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| copy_error(e.to_string()))?
            .to_path_buf();
        let target_path = target_dir.join(&relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path).await.map_err(|e| {
                copy_error(format!("failed to create {}: {}", target_path.display(), e))
            })?;
        } else {
            // Symlinks were followed by the walk, so this copies the target's content
            fs::copy(entry.path(), &target_path).await.map_err(|e| {
                copy_error(format!("failed to write {}: {}", target_path.display(), e))
            })?;
            copied_files.push(relative);
        }
    }

    Ok(copied_files)
}

fn is_vcs_metadata(entry: &DirEntry) -> bool {
    entry.file_name() == VCS_METADATA
}
