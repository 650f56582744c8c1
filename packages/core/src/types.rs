// ABOUTME: Request-scoped domain values exchanged between the resolver, gateway and handlers
// ABOUTME: RepositoryRef, FetchedFile and NotebookEntry; nothing here is persisted

use serde::Serialize;
use std::fmt;

use crate::constants::NOTEBOOK_EXTENSION;

/// A GitHub repository identified by owner and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    /// Build a reference, rejecting empty components
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { owner, name })
    }

    /// `/repos/{owner}/{name}` prefix shared by every GitHub REST path
    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A decoded file fetched from the contents API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    /// UTF-8 text decoded from the base64 payload
    pub content: String,
    /// Git blob SHA reported by GitHub
    pub content_hash: String,
    /// Size reported by the API, not the decoded length
    pub size_bytes: u64,
    /// `html_url` of the file, empty when GitHub omits it
    pub canonical_url: String,
}

/// A notebook file found in a repository tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookEntry {
    pub path: String,
    #[serde(rename = "name")]
    pub file_name: String,
}

impl NotebookEntry {
    /// Build an entry from a tree path, or `None` if it is not a notebook
    pub fn from_path(path: &str) -> Option<Self> {
        if !path.ends_with(NOTEBOOK_EXTENSION) {
            return None;
        }
        let file_name = path.rsplit('/').next().unwrap_or(path).to_string();
        Some(Self {
            path: path.to_string(),
            file_name,
        })
    }
}
