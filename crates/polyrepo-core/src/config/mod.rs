//! Scaffolder settings
//!
//! Settings come from built-in defaults, an optional `polyrepo.yaml`, and a
//! small set of environment overrides. Once loaded they are never mutated;
//! the workflow receives them by reference.

pub mod remote;

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use remote::{RemoteConfig, RemoteTarget};

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "polyrepo.yaml";

/// Environment variable overriding the template repository URL
pub const TEMPLATE_URL_ENV: &str = "POLYREPO_TEMPLATE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Shared template repository, cloned recursively into the staging area
    pub template_url: String,

    /// Auxiliary library linked next to the mobile app in remote mode
    pub lib_react_native_url: String,

    /// Output folder name, relative to the working directory
    pub output_dir: String,

    /// Staging folder name, relative to the output folder
    pub staging_dir: String,

    /// Branch pushed for every repository
    pub default_branch: String,

    /// Program run (without arguments) to install dependencies
    pub package_manager: String,

    /// Delete remote repositories whose names collide with the ones a run creates
    pub replace_existing: bool,

    pub variant_commit_message: String,
    pub umbrella_commit_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_url: "https://github.com/react-ghana/template.git".to_string(),
            lib_react_native_url: "https://github.com/react-ghana/lib-react-native.git"
                .to_string(),
            output_dir: "out".to_string(),
            staging_dir: "tempDir".to_string(),
            default_branch: "main".to_string(),
            package_manager: "yarn".to_string(),
            replace_existing: true,
            variant_commit_message: "Initial commit".to_string(),
            umbrella_commit_message: "Initial commit with submodules".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit file, or `polyrepo.yaml` in `cwd` if present,
    /// then apply environment overrides
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path: Option<PathBuf> = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(TEMPLATE_URL_ENV) {
            settings.apply_template_override(&url);
        }

        Ok(settings)
    }

    /// Parse a settings file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScaffoldError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| ScaffoldError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    fn apply_template_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.template_url = url.to_string();
        }
    }
}
