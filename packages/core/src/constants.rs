/// Branch used whenever the repository default branch cannot be determined
pub const DEFAULT_BRANCH: &str = "main";

/// File extension that identifies a Jupyter notebook in a repository tree
pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// Environment variable holding the token forwarded to the GitHub CLI
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Read the GitHub token from the process environment.
///
/// Always reads the live environment so a long-running server picks up changes
/// between requests. Returns an empty string when the variable is unset.
pub fn github_token() -> String {
    std::env::var(GITHUB_TOKEN_ENV).unwrap_or_default()
}
