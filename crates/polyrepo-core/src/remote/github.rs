//! GitHub REST API client

use super::{Account, OwnerKind, RemoteHost};
use crate::config::RemoteTarget;
use crate::error::RemoteError;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    auto_init: bool,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

/// GitHub (or GitHub Enterprise) API client
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for an API base URL with a custom user agent.
    /// GitHub rejects requests without a user agent, so a client that cannot
    /// carry one is an error.
    pub fn new(api_url: Url, token: Option<String>, user_agent: &str) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(RemoteError::Client)?;
        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    /// Create a client for a resolved remote target
    pub fn for_target(target: &RemoteTarget, user_agent: &str) -> Result<Self, RemoteError> {
        Self::new(target.api_url.clone(), target.token.clone(), user_agent)
    }

    /// Build a URL by appending path segments to the API base
    fn build_url(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&CreateRepoRequest<'_>>,
    ) -> Result<Response, RemoteError> {
        let url = self.build_url(segments)?;
        let method_name = method_name(&method);
        debug!(method = method_name, url = %url, "github request");

        let mut builder = self.request(method, url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| RemoteError::Transport {
                url: url.to_string(),
                source,
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(RemoteError::Status {
                method: method_name,
                url: url.to_string(),
                status,
                body,
            })
        }
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::DELETE => "DELETE",
        _ => "REQUEST",
    }
}

impl RemoteHost for GitHubClient {
    async fn authenticated_login(&self) -> Result<String, RemoteError> {
        let response = self.send(Method::GET, &["user"], None).await?;
        let url = response.url().to_string();
        let user: UserResponse = response
            .json()
            .await
            .map_err(|source| RemoteError::Transport { url, source })?;
        Ok(user.login)
    }

    async fn is_organization(&self, owner: &str) -> Result<bool, RemoteError> {
        self.send(Method::GET, &["orgs", owner], None).await?;
        Ok(true)
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), RemoteError> {
        self.send(Method::DELETE, &["repos", owner, name], None).await?;
        Ok(())
    }

    async fn create_repository(&self, account: &Account, name: &str) -> Result<(), RemoteError> {
        let body = CreateRepoRequest {
            name,
            auto_init: true,
        };
        let segments = match account.kind {
            OwnerKind::Organization => vec!["orgs", account.owner.as_str(), "repos"],
            OwnerKind::Individual => vec!["user", "repos"],
        };
        self.send(Method::POST, &segments, Some(&body)).await?;
        Ok(())
    }
}
