use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use nbpreview_git_utils::RepositoryClient;

pub mod health;
pub mod notebooks;

/// Shared handler state; holds no per-request data
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RepositoryClient>,
}

impl AppState {
    pub fn new(client: RepositoryClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/fetch-notebook", post(notebooks::fetch_notebook))
        .route("/api/list-notebooks", post(notebooks::list_notebooks))
        .with_state(state)
}
