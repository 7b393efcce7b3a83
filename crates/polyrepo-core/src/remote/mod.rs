//! Remote repository hosting
//!
//! The workflow only needs four calls from the hosting provider. `GitHubClient`
//! implements them against the GitHub REST API.

pub mod github;

use crate::error::RemoteError;
use std::fmt;

pub use github::GitHubClient;

/// Whether the configured owner is an organization or a personal account.
/// Repository creation goes through a different endpoint for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    Organization,
    Individual,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerKind::Organization => write!(f, "organization"),
            OwnerKind::Individual => write!(f, "user account"),
        }
    }
}

/// The account new repositories are created under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub owner: String,
    pub kind: OwnerKind,
}

#[allow(async_fn_in_trait)]
pub trait RemoteHost {
    /// Login of the account the credential belongs to
    async fn authenticated_login(&self) -> Result<String, RemoteError>;

    /// `Ok(true)` when `owner` is an organization. A lookup failure is an error;
    /// callers decide how to interpret it.
    async fn is_organization(&self, owner: &str) -> Result<bool, RemoteError>;

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), RemoteError>;

    /// Create `name` under `account` with an initial commit on the default branch
    async fn create_repository(&self, account: &Account, name: &str) -> Result<(), RemoteError>;
}
