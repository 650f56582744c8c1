// ABOUTME: GitHub CLI wrapper exposing `gh api` calls as parsed JSON
// ABOUTME: Handles availability detection, token injection, timeouts and error mapping

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::runner::{CommandOutput, CommandRunner, SystemCommandRunner};
use nbpreview_core::GITHUB_TOKEN_ENV;

#[derive(Debug, Error)]
pub enum GitHubCliError {
    #[error("gh CLI not available: {0}")]
    NotAvailable(String),

    #[error("gh command failed: {0}")]
    CommandFailed(String),

    #[error("Failed to parse gh output: {0}")]
    InvalidResponse(String),

    #[error("gh command timed out after {0}s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GitHubCliError>;

/// GitHub CLI wrapper
pub struct GitHubCli {
    gh_path: String,
    runner: Arc<dyn CommandRunner>,
    timeout: Option<Duration>,
}

impl GitHubCli {
    /// Wrap the `gh` binary found at `gh_path` (a name resolved through PATH or a full path)
    pub fn new(gh_path: impl Into<String>) -> Self {
        Self::with_runner(gh_path, Arc::new(SystemCommandRunner))
    }

    /// Wrap `gh` using a custom process runner
    pub fn with_runner(gh_path: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            gh_path: gh_path.into(),
            runner,
            timeout: None,
        }
    }

    /// Bound every invocation. `None` waits for the process indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn gh_path(&self) -> &str {
        &self.gh_path
    }

    /// Check whether `gh --version` runs and exits successfully.
    ///
    /// Not cached: the binary may be installed or removed while the server runs.
    pub async fn is_available(&self) -> bool {
        match self.execute(vec!["--version".to_string()], Vec::new()).await {
            Ok(output) => output.success(),
            Err(e) => {
                debug!("gh availability check failed: {}", e);
                false
            }
        }
    }

    /// Run `gh api <api_path>` with `GITHUB_TOKEN` set to `token` and parse stdout as JSON
    ///
    /// # Arguments
    /// * `api_path` - REST path relative to the API root, e.g. `/repos/{owner}/{repo}`
    /// * `token` - Token forwarded to gh (may be empty)
    pub async fn api(&self, api_path: &str, token: &str) -> Result<Value> {
        debug!(api_path = %api_path, "Invoking gh api");

        let args = vec!["api".to_string(), api_path.to_string()];
        let envs = vec![(GITHUB_TOKEN_ENV.to_string(), token.to_string())];
        let output = self.execute(args, envs).await?;

        if !output.success() {
            debug!(
                api_path = %api_path,
                exit_code = ?output.exit_code,
                "gh api exited with failure"
            );
            return Err(GitHubCliError::CommandFailed(output.stderr));
        }

        serde_json::from_str(&output.stdout)
            .map_err(|e| GitHubCliError::InvalidResponse(e.to_string()))
    }

    async fn execute(
        &self,
        args: Vec<String>,
        envs: Vec<(String, String)>,
    ) -> Result<CommandOutput> {
        let run = self.runner.run(&self.gh_path, &args, &envs);

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| GitHubCliError::Timeout(limit.as_secs()))?,
            None => run.await,
        };

        result.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                GitHubCliError::NotAvailable(format!("{} not found", self.gh_path))
            }
            _ => GitHubCliError::IoError(e),
        })
    }
}

impl Default for GitHubCli {
    fn default() -> Self {
        Self::new("gh")
    }
}
