// ABOUTME: Core types and utilities for the notebook preview backend
// ABOUTME: Request-scoped domain values plus GitHub repository URL parsing

pub mod constants;
pub mod repo_url;
pub mod types;

// Re-export main types
pub use types::{FetchedFile, NotebookEntry, RepositoryRef};

// Re-export constants
pub use constants::{github_token, DEFAULT_BRANCH, GITHUB_TOKEN_ENV, NOTEBOOK_EXTENSION};

// Re-export URL parsing
pub use repo_url::parse_repository_url;
