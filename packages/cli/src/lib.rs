// ABOUTME: HTTP server for previewing GitHub-hosted Jupyter notebooks
// ABOUTME: Wires config, the gh-backed repository client, routes and middleware together

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;

#[cfg(test)]
mod tests;

use api::AppState;
use config::{Config, ConfigError};
use nbpreview_git_utils::{GitHubCli, RepositoryClient};

/// Build handler state from configuration; the token is read from the environment per call
pub fn build_state(config: &Config) -> AppState {
    let cli = GitHubCli::new(config.gh_path.clone()).with_timeout(config.gh_timeout);
    AppState::new(RepositoryClient::new(cli))
}

/// Router plus CORS, request tracing and panic recovery
pub fn create_app(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let cors = match &config.cors_origin {
        Some(origin) => cors.allow_origin(
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?,
        ),
        None => cors.allow_origin(Any),
    };

    Ok(api::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::create_panic_handler()))
}

/// Log whether gh and a token are usable. Neither is required to start.
pub async fn log_environment(state: &AppState) {
    let gh_available = state.client.cli().is_available().await;
    let token_set = state.client.token_is_set();

    info!(
        gh_path = %state.client.cli().gh_path(),
        gh_cli_available = gh_available,
        github_token_set = token_set,
        "Checked GitHub CLI environment"
    );

    if !gh_available {
        warn!("GitHub CLI (gh) is not available. Install it from https://cli.github.com/");
    }

    if !token_set {
        warn!("GITHUB_TOKEN is not set. Set it with: export GITHUB_TOKEN=your_token");
    }
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = build_state(&config);
    log_environment(&state).await;

    let app = create_app(state, &config)?;
    let addr = config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
