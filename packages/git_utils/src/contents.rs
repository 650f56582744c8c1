// ABOUTME: Repository content access built on the GitHub CLI wrapper
// ABOUTME: Default branch resolution, file fetching with base64 decoding, notebook tree listing

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::github::{GitHubCli, GitHubCliError};
use nbpreview_core::{github_token, FetchedFile, NotebookEntry, RepositoryRef, DEFAULT_BRANCH};

#[derive(Debug, Error)]
pub enum FetchError {
    /// Failure reported by gh, message already formatted for the client
    #[error("{0}")]
    Upstream(String),

    #[error("Unexpected GitHub response: {0}")]
    MalformedPayload(String),

    #[error("Failed to decode file content: {0}")]
    DecodeFailed(String),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Where the token forwarded to gh comes from
#[derive(Debug, Clone, Default)]
pub enum TokenSource {
    /// Read `GITHUB_TOKEN` from the process environment on every call
    #[default]
    Environment,
    /// Always use this token
    Fixed(String),
}

impl TokenSource {
    fn resolve(&self) -> String {
        match self {
            TokenSource::Environment => github_token(),
            TokenSource::Fixed(token) => token.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentsPayload {
    content: String,
    sha: String,
    size: u64,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TreePayload {
    #[serde(default)]
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Read-only view of GitHub repositories through `gh api`
pub struct RepositoryClient {
    cli: GitHubCli,
    token: TokenSource,
}

impl RepositoryClient {
    pub fn new(cli: GitHubCli) -> Self {
        Self::with_token_source(cli, TokenSource::Environment)
    }

    pub fn with_token_source(cli: GitHubCli, token: TokenSource) -> Self {
        Self { cli, token }
    }

    pub fn cli(&self) -> &GitHubCli {
        &self.cli
    }

    /// Whether a non-empty token would be forwarded to gh right now
    pub fn token_is_set(&self) -> bool {
        !self.token.resolve().is_empty()
    }

    /// Resolve the repository default branch.
    ///
    /// Never fails: any gh error or a missing `default_branch` field yields `"main"`.
    pub async fn default_branch(&self, repo: &RepositoryRef) -> String {
        match self.cli.api(&repo.api_path(), &self.token.resolve()).await {
            Ok(metadata) => metadata
                .get("default_branch")
                .and_then(Value::as_str)
                .filter(|branch| !branch.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    debug!(repository = %repo, "No default_branch in metadata, using {}", DEFAULT_BRANCH);
                    DEFAULT_BRANCH.to_string()
                }),
            Err(e) => {
                warn!(
                    repository = %repo,
                    error = %e,
                    "Failed to resolve default branch, using {}",
                    DEFAULT_BRANCH
                );
                DEFAULT_BRANCH.to_string()
            }
        }
    }

    /// Fetch and decode a file through the contents API
    ///
    /// # Arguments
    /// * `repo` - Repository to read from
    /// * `path` - File path inside the repository
    /// * `branch` - Git ref; an empty string lets GitHub pick the default branch
    pub async fn fetch_file(
        &self,
        repo: &RepositoryRef,
        path: &str,
        branch: &str,
    ) -> FetchResult<FetchedFile> {
        let api_path = contents_api_path(repo, path, branch);

        let value = self
            .cli
            .api(&api_path, &self.token.resolve())
            .await
            .map_err(|e| upstream_error("GitHub CLI error", e))?;

        let payload: ContentsPayload = serde_json::from_value(value)
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

        let content = decode_content(&payload.content)?;

        Ok(FetchedFile {
            content,
            content_hash: payload.sha,
            size_bytes: payload.size,
            canonical_url: payload.html_url.unwrap_or_default(),
        })
    }

    /// List every `.ipynb` blob in the repository tree at `branch`
    pub async fn list_notebooks(
        &self,
        repo: &RepositoryRef,
        branch: &str,
    ) -> FetchResult<Vec<NotebookEntry>> {
        let api_path = format!("{}/git/trees/{}?recursive=1", repo.api_path(), branch);

        let value = self
            .cli
            .api(&api_path, &self.token.resolve())
            .await
            .map_err(|e| upstream_error("Failed to list files", e))?;

        let payload: TreePayload = serde_json::from_value(value)
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

        if payload.truncated {
            warn!(
                repository = %repo,
                branch = %branch,
                "Repository tree was truncated by GitHub, listing may be incomplete"
            );
        }

        Ok(notebooks_in_tree(payload.tree))
    }
}

fn contents_api_path(repo: &RepositoryRef, path: &str, branch: &str) -> String {
    let mut api_path = format!("{}/contents/{}", repo.api_path(), path);
    if !branch.is_empty() {
        api_path.push_str("?ref=");
        api_path.push_str(branch);
    }
    api_path
}

fn upstream_error(prefix: &str, error: GitHubCliError) -> FetchError {
    match error {
        GitHubCliError::CommandFailed(stderr) => {
            FetchError::Upstream(format!("{}: {}", prefix, stderr))
        }
        other => FetchError::Upstream(other.to_string()),
    }
}

fn notebooks_in_tree(tree: Vec<TreeItem>) -> Vec<NotebookEntry> {
    tree.into_iter()
        .filter(|item| item.kind == "blob")
        .filter_map(|item| NotebookEntry::from_path(&item.path))
        .collect()
}

/// Decode a contents API payload.
///
/// GitHub wraps the base64 text with newlines, so ASCII whitespace is dropped first.
pub fn decode_content(encoded: &str) -> FetchResult<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| FetchError::DecodeFailed(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| FetchError::DecodeFailed(e.to_string()))
}
