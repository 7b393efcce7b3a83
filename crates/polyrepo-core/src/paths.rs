//! Output path resolution
//!
//! Every path the scaffolder writes to lives under `<root>/<output_dir>`.

use std::path::{Path, PathBuf};

/// Maps project-relative paths to absolute paths under the output folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    output_root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `root/output_dir`. A relative root is
    /// made absolute against the current directory.
    pub fn new(root: impl AsRef<Path>, output_dir: &str) -> Self {
        let root = root.as_ref();
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        Self {
            output_root: root.join(output_dir),
        }
    }

    /// The output folder itself
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Resolve a project-relative path, e.g. `demo/app/react/web`
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref();
        let relative = relative.strip_prefix(".").unwrap_or(relative);
        self.output_root.join(relative)
    }

    /// Directory of the umbrella project
    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.resolve(project)
    }

    /// Directory of one subpath inside the umbrella project
    pub fn project_subdir(&self, project: &str, subpath: &str) -> PathBuf {
        self.project_dir(project).join(subpath)
    }
}
