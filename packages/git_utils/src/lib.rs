// ABOUTME: GitHub access for the notebook preview backend, driven entirely through the gh CLI
// ABOUTME: Subprocess runner seam, `gh api` wrapper and repository content helpers

pub mod contents;
pub mod github;
pub mod runner;

pub use contents::{decode_content, FetchError, FetchResult, RepositoryClient, TokenSource};
pub use github::{GitHubCli, GitHubCliError};
pub use runner::{CommandOutput, CommandRunner, SystemCommandRunner};
