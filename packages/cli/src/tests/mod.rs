
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::api::AppState;
use crate::config::Config;
use crate::create_app;
use nbpreview_git_utils::{CommandOutput, CommandRunner, GitHubCli, RepositoryClient, TokenSource};

/// Stand-in for the gh binary: answers `--version` and scripted `api` paths
pub struct FakeGh {
    installed: bool,
    replies: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<(Vec<String>, Vec<(String, String)>)>>,
}

impl FakeGh {
    pub fn installed() -> Self {
        Self {
            installed: true,
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn missing() -> Self {
        Self {
            installed: false,
            ..Self::installed()
        }
    }

    pub fn reply_json(mut self, api_path: &str, body: Value) -> Self {
        self.replies.insert(
            api_path.to_string(),
            CommandOutput {
                stdout: body.to_string(),
                stderr: String::new(),
                exit_code: Some(0),
            },
        );
        self
    }

    pub fn reply_raw(mut self, api_path: &str, stdout: &str) -> Self {
        self.replies.insert(
            api_path.to_string(),
            CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: Some(0),
            },
        );
        self
    }

    pub fn reply_error(mut self, api_path: &str, stderr: &str) -> Self {
        self.replies.insert(
            api_path.to_string(),
            CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_code: Some(1),
            },
        );
        self
    }

    /// `gh api` paths requested so far, in order
    pub fn api_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(args, _)| args.first().map(String::as_str) == Some("api"))
            .map(|(args, _)| args[1].clone())
            .collect()
    }

    /// Environment passed with each `gh api` call
    pub fn api_envs(&self) -> Vec<Vec<(String, String)>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(args, _)| args.first().map(String::as_str) == Some("api"))
            .map(|(_, envs)| envs.clone())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for FakeGh {
    async fn run(
        &self,
        _program: &str,
        args: &[String],
        envs: &[(String, String)],
    ) -> std::io::Result<CommandOutput> {
        if !self.installed {
            return Err(std::io::Error::from(std::io::ErrorKind::NotFound));
        }

        self.calls
            .lock()
            .unwrap()
            .push((args.to_vec(), envs.to_vec()));

        match args.first().map(String::as_str) {
            Some("--version") => Ok(CommandOutput {
                stdout: "gh version 2.40.0 (2023-12-13)\n".to_string(),
                stderr: String::new(),
                exit_code: Some(0),
            }),
            Some("api") => {
                let path = args.get(1).cloned().unwrap_or_default();
                Ok(self.replies.get(&path).cloned().unwrap_or(CommandOutput {
                    stdout: String::new(),
                    stderr: "gh: Not Found (HTTP 404)\n".to_string(),
                    exit_code: Some(1),
                }))
            }
            _ => Ok(CommandOutput {
                stdout: String::new(),
                stderr: "unknown command\n".to_string(),
                exit_code: Some(1),
            }),
        }
    }
}

/// Full app (router plus middleware) backed by a fake gh and a fixed token
pub fn test_app(gh: Arc<FakeGh>, token: &str) -> Router {
    let cli = GitHubCli::with_runner("gh", gh);
    let client =
        RepositoryClient::with_token_source(cli, TokenSource::Fixed(token.to_string()));
    create_app(AppState::new(client), &Config::default()).unwrap()
}

/// Full app whose token is read from the process `GITHUB_TOKEN` on every call
pub fn env_token_app(gh: Arc<FakeGh>) -> Router {
    let client = RepositoryClient::new(GitHubCli::with_runner("gh", gh));
    create_app(AppState::new(client), &Config::default()).unwrap()
}

/// Send one request and decode the JSON response body
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}
