//! The user's choices for a run

use crate::error::{Result, ScaffoldError};
use crate::variants::Variant;
use std::collections::BTreeSet;

/// Project name and selected variants. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSelection {
    name: String,
    variants: BTreeSet<Variant>,
}

impl ProjectSelection {
    /// The name becomes a directory and a repository-name prefix, so it must
    /// be a single non-empty path segment. An empty variant set is allowed
    /// and produces an empty umbrella project.
    pub fn new(name: &str, variants: impl IntoIterator<Item = Variant>) -> Result<Self> {
        let name = name.trim();
        validate_name(name).map_err(ScaffoldError::Config)?;
        Ok(Self {
            name: name.to_string(),
            variants: variants.into_iter().collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selected variants in processing order
    pub fn variants(&self) -> impl Iterator<Item = Variant> + '_ {
        self.variants.iter().copied()
    }

    pub fn contains(&self, variant: Variant) -> bool {
        self.variants.contains(&variant)
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Names of every remote repository a remote-mode run creates
    pub fn repository_names(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.variants().map(|v| v.repo_name(&self.name)))
            .collect()
    }
}

/// Check a project name; returns the reason it is rejected
pub fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("project name must not be empty".to_string());
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(format!("project name `{}` must be a single path segment", name));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(format!("project name `{}` must not contain whitespace", name));
    }
    Ok(())
}
