use std::sync::Mutex;

use crate::error::{Result, VersionError};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
///
/// Unset values answer with a command error, the same way a real
/// repository without that state would.
#[derive(Default)]
pub struct MockRepository {
    branch: Option<String>,
    head_sha: Option<String>,
    tags: Vec<String>,
    fetch_fails: bool,
    fetches: Mutex<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the checked-out branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Set the abbreviated HEAD hash
    pub fn with_head_sha(mut self, sha: impl Into<String>) -> Self {
        self.head_sha = Some(sha.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    /// Make every fetch fail
    pub fn with_failing_fetch(mut self) -> Self {
        self.fetch_fails = true;
        self
    }

    /// `(remote, branch)` pairs passed to `fetch_tags`, in call order
    pub fn fetches(&self) -> Vec<(String, String)> {
        self.fetches
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }
}

/// Glob match supporting a single trailing `*`, enough for RC patterns
fn glob_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => name == pattern,
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| VersionError::command("mock: no branch"))
    }

    fn short_head_sha(&self) -> Result<String> {
        self.head_sha
            .clone()
            .ok_or_else(|| VersionError::command("mock: no HEAD"))
    }

    fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self
            .tags
            .iter()
            .filter(|t| glob_matches(pattern, t))
            .cloned()
            .collect())
    }

    fn fetch_tags(&self, remote: &str, branch: &str) -> Result<()> {
        if let Ok(mut fetches) = self.fetches.lock() {
            fetches.push((remote.to_string(), branch.to_string()));
        }

        if self.fetch_fails {
            Err(VersionError::command("mock: fetch failed"))
        } else {
            Ok(())
        }
    }
}
