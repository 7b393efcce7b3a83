//! Remote hosting configuration
//!
//! Read once from the environment at startup. When neither `GITHUB_URL` nor
//! `GITHUB_TOKEN` is set the run is local-only.

use crate::error::{Result, ScaffoldError};
use crate::remote::RemoteHost;
use url::Url;

pub const GITHUB_URL_ENV: &str = "GITHUB_URL";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const GITHUB_API_URL_ENV: &str = "GITHUB_API_URL";

const PUBLIC_WEB_URL: &str = "https://github.com";
const PUBLIC_API_URL: &str = "https://api.github.com";

/// Raw remote settings as found in the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub web_url: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
}

impl RemoteConfig {
    /// Read the environment; `None` selects local-only mode
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var(GITHUB_URL_ENV).ok(),
            std::env::var(GITHUB_TOKEN_ENV).ok(),
            std::env::var(GITHUB_API_URL_ENV).ok(),
        )
    }

    /// Build from explicit values. Blank values count as absent.
    pub fn from_values(
        web_url: Option<String>,
        token: Option<String>,
        api_url: Option<String>,
    ) -> Option<Self> {
        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let config = Self {
            web_url: non_blank(web_url),
            token: non_blank(token),
            api_url: non_blank(api_url),
        };

        if config.web_url.is_none() && config.token.is_none() {
            None
        } else {
            Some(config)
        }
    }

    /// API base URL for the configured host
    pub fn api_base(&self) -> Result<Url> {
        if let Some(api) = &self.api_url {
            return parse_url(api);
        }
        match &self.web_url {
            Some(web) => derive_api_url(&parse_url(web)?),
            None => parse_url(PUBLIC_API_URL),
        }
    }

    /// Owner named by the web URL, if any
    pub fn owner_from_url(&self) -> Result<Option<String>> {
        let Some(web) = &self.web_url else {
            return Ok(None);
        };
        let url = parse_url(web)?;
        let owner = url
            .path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            .map(str::to_string)
            .ok_or_else(|| {
                ScaffoldError::Config(format!(
                    "{} must name an account or organization, e.g. https://github.com/acme (got {})",
                    GITHUB_URL_ENV, web
                ))
            })?;
        Ok(Some(owner))
    }

    /// Resolve the owner, asking the host for the authenticated account when
    /// only a token was configured
    pub async fn resolve<H: RemoteHost>(&self, host: &H) -> Result<RemoteTarget> {
        let api_url = self.api_base()?;

        let (owner, web_url) = match self.owner_from_url()? {
            Some(owner) => {
                let web = self.web_url.as_deref().unwrap_or(PUBLIC_WEB_URL);
                (owner, web.trim_end_matches('/').to_string())
            }
            None => {
                let login = host.authenticated_login().await.map_err(|e| {
                    ScaffoldError::Config(format!(
                        "{} is not set and the authenticated account could not be resolved: {}",
                        GITHUB_URL_ENV, e
                    ))
                })?;
                let web = format!("{}/{}", PUBLIC_WEB_URL, login);
                (login, web)
            }
        };

        Ok(RemoteTarget {
            web_url,
            owner,
            api_url,
            token: self.token.clone(),
        })
    }
}

/// Resolved remote endpoint for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// Web URL of the owner, without trailing slash
    pub web_url: String,
    pub owner: String,
    pub api_url: Url,
    pub token: Option<String>,
}

impl RemoteTarget {
    /// Clone URL of a repository owned by the target
    pub fn repo_url(&self, repo: &str) -> String {
        format!("{}/{}.git", self.web_url, repo)
    }
}

fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| ScaffoldError::Config(format!("invalid URL {}: {}", value, e)))
}

/// `github.com` uses the public API host; any other host is treated as
/// GitHub Enterprise with the API under `/api/v3`
fn derive_api_url(web: &Url) -> Result<Url> {
    let host = web
        .host_str()
        .ok_or_else(|| ScaffoldError::Config(format!("URL has no host: {}", web)))?;

    if host == "github.com" || host == "www.github.com" {
        return parse_url(PUBLIC_API_URL);
    }

    let mut api = format!("{}://{}", web.scheme(), host);
    if let Some(port) = web.port() {
        api.push_str(&format!(":{}", port));
    }
    api.push_str("/api/v3");
    parse_url(&api)
}
