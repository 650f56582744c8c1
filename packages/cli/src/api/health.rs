use axum::{extract::State, Json};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub gh_cli_available: bool,
    pub github_token_set: bool,
}

/// Report whether gh can be run and a token is configured.
///
/// Both checks run on every request; neither affects the status code.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        gh_cli_available: state.client.cli().is_available().await,
        github_token_set: state.client.token_is_set(),
    })
}
