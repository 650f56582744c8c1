// ABOUTME: Integration tests for the gh wrapper and repository client public API
// ABOUTME: Uses a scripted CommandRunner so no real gh binary or network is needed

use async_trait::async_trait;
use nbpreview_core::{parse_repository_url, NotebookEntry};
use nbpreview_git_utils::{
    CommandOutput, CommandRunner, FetchError, GitHubCli, RepositoryClient, TokenSource,
};
use std::sync::{Arc, Mutex};

/// Replies to `gh api <path>` by path and records every call
struct ScriptedGh {
    replies: Vec<(&'static str, CommandOutput)>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGh {
    fn new(replies: Vec<(&'static str, CommandOutput)>) -> Self {
        Self {
            replies,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedGh {
    async fn run(
        &self,
        _program: &str,
        args: &[String],
        _envs: &[(String, String)],
    ) -> std::io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        let path = args.get(1).map(String::as_str).unwrap_or_default();
        Ok(self
            .replies
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, out)| out.clone())
            .unwrap_or(CommandOutput {
                stdout: String::new(),
                stderr: format!("gh: Not Found (HTTP 404) for {}", path),
                exit_code: Some(1),
            }))
    }
}

fn json_reply(body: &str) -> CommandOutput {
    CommandOutput {
        stdout: body.to_string(),
        stderr: String::new(),
        exit_code: Some(0),
    }
}

fn client(runner: Arc<ScriptedGh>) -> RepositoryClient {
    RepositoryClient::with_token_source(
        GitHubCli::with_runner("gh", runner),
        TokenSource::Fixed(String::new()),
    )
}

#[tokio::test]
async fn test_resolve_then_fetch_uses_default_branch() {
    let runner = Arc::new(ScriptedGh::new(vec![
        ("/repos/acme/demo", json_reply(r#"{"default_branch":"trunk"}"#)),
        (
            "/repos/acme/demo/contents/nb/a.ipynb?ref=trunk",
            // base64 of {"cells":[]}
            json_reply(r#"{"content":"eyJjZWxscyI6W119\n","sha":"s1","size":12}"#),
        ),
    ]));
    let client = client(runner.clone());

    let repo = parse_repository_url("https://github.com/acme/demo").unwrap();
    let branch = client.default_branch(&repo).await;
    let file = client.fetch_file(&repo, "nb/a.ipynb", &branch).await.unwrap();

    assert_eq!(branch, "trunk");
    assert_eq!(file.content, r#"{"cells":[]}"#);
    assert_eq!(file.size_bytes, 12);
    assert_eq!(
        runner.calls(),
        vec![
            vec!["api".to_string(), "/repos/acme/demo".to_string()],
            vec![
                "api".to_string(),
                "/repos/acme/demo/contents/nb/a.ipynb?ref=trunk".to_string()
            ],
        ]
    );
}

#[tokio::test]
async fn test_unknown_repository_falls_back_to_main() {
    let runner = Arc::new(ScriptedGh::new(Vec::new()));
    let client = client(runner);

    let repo = parse_repository_url("ghost/nothing.git").unwrap();
    assert_eq!(client.default_branch(&repo).await, "main");
}

#[tokio::test]
async fn test_missing_file_is_upstream_error() {
    let runner = Arc::new(ScriptedGh::new(Vec::new()));
    let client = client(runner);

    let repo = parse_repository_url("acme/demo").unwrap();
    let err = client.fetch_file(&repo, "gone.ipynb", "main").await.unwrap_err();

    match err {
        FetchError::Upstream(message) => {
            assert!(message.starts_with("GitHub CLI error: gh: Not Found"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_list_notebooks_through_public_api() {
    let runner = Arc::new(ScriptedGh::new(vec![(
        "/repos/acme/demo/git/trees/main?recursive=1",
        json_reply(
            r#"{"tree":[{"path":"a.ipynb","type":"blob"},{"path":"docs/guide.md","type":"blob"}]}"#,
        ),
    )]));
    let client = client(runner);

    let repo = parse_repository_url("acme/demo").unwrap();
    let notebooks = client.list_notebooks(&repo, "main").await.unwrap();

    assert_eq!(notebooks, vec![NotebookEntry::from_path("a.ipynb").unwrap()]);
}

#[tokio::test]
async fn test_gh_cli_availability_detection() {
    // Works whether or not gh is installed on the machine running the tests
    let cli = GitHubCli::default();
    let available = cli.is_available().await;
    println!("gh available: {}", available);

    let missing = GitHubCli::new("nbpreview-no-such-gh-binary");
    assert!(!missing.is_available().await);
}
