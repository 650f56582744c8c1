// ABOUTME: Parses user-supplied GitHub repository references into owner/name pairs
// ABOUTME: Accepts full github.com URLs (with any trailing path) and bare owner/repo strings

use regex::Regex;
use std::sync::LazyLock;

use crate::types::RepositoryRef;

/// `github.com/{owner}/{repo}` anywhere in the input; the repo group stops at the next `/`
static GITHUB_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/]+)").expect("valid regex"));

/// The whole input is exactly `{owner}/{repo}`
static SHORT_FORM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^/]+)/([^/]+)$").expect("valid regex"));

/// Extract `(owner, repo)` from a repository URL or `owner/repo` shorthand.
///
/// Patterns are tried in order and the first match wins, so anything containing
/// `github.com/` is read as a host URL even when it is really a path fragment.
/// A trailing `.git` is stripped from the repository name. Returns `None` when
/// nothing matches or a component ends up empty.
pub fn parse_repository_url(input: &str) -> Option<RepositoryRef> {
    [&*GITHUB_URL_PATTERN, &*SHORT_FORM_PATTERN]
        .into_iter()
        .find_map(|pattern| pattern.captures(input))
        .and_then(|caps| {
            let owner = caps.get(1)?.as_str();
            let repo = caps.get(2)?.as_str();
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            RepositoryRef::new(owner, repo)
        })
}
