use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::AppState;
use crate::error::{ApiResult, AppError};
use nbpreview_core::{parse_repository_url, NotebookEntry, RepositoryRef};

#[derive(Debug, Deserialize)]
pub struct FetchNotebookRequest {
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListNotebooksRequest {
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotebookInfo {
    pub repository: String,
    pub branch: String,
    pub path: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct FetchNotebookResponse {
    pub notebook: Value,
    pub info: NotebookInfo,
}

#[derive(Debug, Serialize)]
pub struct ListNotebooksResponse {
    pub notebooks: Vec<NotebookEntry>,
    pub count: usize,
}

/// POST /api/fetch-notebook
/// Fetch one notebook from a repository and return it parsed
pub async fn fetch_notebook(
    State(state): State<AppState>,
    payload: Result<Json<FetchNotebookRequest>, JsonRejection>,
) -> ApiResult<Json<FetchNotebookResponse>> {
    let Json(request) = payload?;
    let repo_url = request.repo_url.unwrap_or_default();
    let file_path = request.file_path.unwrap_or_default();

    if repo_url.is_empty() || file_path.is_empty() {
        return Err(AppError::validation("repo_url and file_path are required"));
    }

    let repo = resolve_repository(&state, &repo_url).await?;
    let branch = resolve_branch(&state, &repo, request.branch).await;

    info!(repository = %repo, branch = %branch, path = %file_path, "Fetching notebook");

    let file = state.client.fetch_file(&repo, &file_path, &branch).await?;

    let notebook: Value = serde_json::from_str(&file.content).map_err(|e| {
        debug!(path = %file_path, error = %e, "Fetched file is not valid notebook JSON");
        AppError::InvalidNotebookFormat
    })?;

    Ok(Json(FetchNotebookResponse {
        notebook,
        info: NotebookInfo {
            repository: repo.to_string(),
            branch,
            path: file_path,
            size: file.size_bytes,
            url: file.canonical_url,
        },
    }))
}

/// POST /api/list-notebooks
/// List every notebook in a repository tree
pub async fn list_notebooks(
    State(state): State<AppState>,
    payload: Result<Json<ListNotebooksRequest>, JsonRejection>,
) -> ApiResult<Json<ListNotebooksResponse>> {
    let Json(request) = payload?;
    let repo_url = request.repo_url.unwrap_or_default();

    if repo_url.is_empty() {
        return Err(AppError::validation("repo_url is required"));
    }

    let repo = resolve_repository(&state, &repo_url).await?;
    let branch = resolve_branch(&state, &repo, request.branch).await;

    info!(repository = %repo, branch = %branch, "Listing notebooks");

    let notebooks = state.client.list_notebooks(&repo, &branch).await?;

    Ok(Json(ListNotebooksResponse {
        count: notebooks.len(),
        notebooks,
    }))
}

/// Check gh is usable, then parse the repository reference
async fn resolve_repository(state: &AppState, repo_url: &str) -> ApiResult<RepositoryRef> {
    if !state.client.cli().is_available().await {
        return Err(AppError::GhUnavailable);
    }

    parse_repository_url(repo_url).ok_or(AppError::InvalidRepositoryUrl)
}

async fn resolve_branch(state: &AppState, repo: &RepositoryRef, branch: Option<String>) -> String {
    match branch.filter(|b| !b.is_empty()) {
        Some(branch) => branch,
        None => state.client.default_branch(repo).await,
    }
}
