use std::path::Path;

use git2::{Cred, CredentialType, FetchOptions, ObjectType, RemoteCallbacks, Repository as Git2Repo};

use crate::error::{Result, VersionError};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

/// Credentials for fetching: SSH keys from ~/.ssh, then the SSH agent,
/// then whatever libgit2 finds by default.
fn credentials_callback<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if !head.is_branch() {
            return Ok("HEAD".to_string());
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| VersionError::version("HEAD branch name is not valid UTF-8"))
    }

    fn short_head_sha(&self) -> Result<String> {
        let commit = self.repo.head()?.peel(ObjectType::Commit)?;
        let short = commit.short_id()?;

        short
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| VersionError::version("abbreviated commit id is not valid UTF-8"))
    }

    fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(Some(pattern))?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn fetch_tags(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| VersionError::command(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(credentials_callback());

        let branch_refspec = format!("+refs/heads/{0}:refs/remotes/{1}/{0}", branch, remote);
        let refspecs = [branch_refspec.as_str(), "+refs/tags/*:refs/tags/*"];

        remote_handle
            .fetch(&refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                VersionError::command(format!("Fetch from '{}' failed: {}", remote, e))
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::Signature;

    fn init_repo_with_commit(dir: &Path) -> Git2Repo {
        let repo = Git2Repo::init(dir).unwrap();
        {
            let sig = Signature::now("Test", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
        }
        repo
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A bare tempdir is normally not inside a repository.
        if Git2Repo::discover(dir.path()).is_err() {
            assert!(Git2Repository::open(dir.path()).is_err());
        }
    }

    #[test]
    fn test_branch_sha_and_tags() {
        let dir = tempfile::tempdir().unwrap();
        let raw = init_repo_with_commit(dir.path());
        {
            let head = raw.head().unwrap().peel(ObjectType::Commit).unwrap();
            raw.tag_lightweight("1.0.0rc1", &head, false).unwrap();
            raw.tag_lightweight("1.0.0rc2", &head, false).unwrap();
            raw.tag_lightweight("0.9.0", &head, false).unwrap();
        }
        let expected_branch = raw.head().unwrap().shorthand().unwrap().to_string();

        let repo = Git2Repository::from_git2(raw);

        assert_eq!(repo.current_branch().unwrap(), expected_branch);
        assert!(repo.short_head_sha().unwrap().len() >= 7);

        let mut tags = repo.list_tags("1.0.0rc*").unwrap();
        tags.sort();
        assert_eq!(tags, vec!["1.0.0rc1".to_string(), "1.0.0rc2".to_string()]);
    }

    #[test]
    fn test_detached_head_reports_head() {
        let dir = tempfile::tempdir().unwrap();
        let raw = init_repo_with_commit(dir.path());
        let oid = raw.head().unwrap().target().unwrap();
        raw.set_head_detached(oid).unwrap();

        let repo = Git2Repository::from_git2(raw);
        assert_eq!(repo.current_branch().unwrap(), "HEAD");
    }

    #[test]
    fn test_fetch_tags_from_local_remote() {
        let upstream_dir = tempfile::tempdir().unwrap();
        {
            let upstream = Git2Repo::init(upstream_dir.path()).unwrap();
            let sig = Signature::now("Test", "test@example.com").unwrap();
            let tree_id = upstream.index().unwrap().write_tree().unwrap();
            let tree = upstream.find_tree(tree_id).unwrap();
            let oid = upstream
                .commit(Some("refs/heads/develop"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
            let commit = upstream.find_object(oid, None).unwrap();
            upstream.tag_lightweight("1.0.0rc1", &commit, false).unwrap();
            upstream.tag_lightweight("1.0.0rc2", &commit, false).unwrap();
        }

        let clone_dir = tempfile::tempdir().unwrap();
        let raw = Git2Repo::init(clone_dir.path()).unwrap();
        {
            let url = upstream_dir.path().to_str().unwrap();
            raw.remote("origin", url).unwrap();
        }
        let repo = Git2Repository::from_git2(raw);
        assert!(repo.list_tags("1.0.0rc*").unwrap().is_empty());

        repo.fetch_tags("origin", "develop").unwrap();

        let mut tags = repo.list_tags("1.0.0rc*").unwrap();
        tags.sort();
        assert_eq!(tags, vec!["1.0.0rc1".to_string(), "1.0.0rc2".to_string()]);
        assert!(repo
            .repo
            .find_reference("refs/remotes/origin/develop")
            .is_ok());
    }

    #[test]
    fn test_fetch_without_remote_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(init_repo_with_commit(dir.path()));
        assert!(repo.fetch_tags("origin", "develop").is_err());
    }

    #[test]
    fn test_empty_repository_has_no_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init(dir.path()).unwrap());
        assert!(repo.current_branch().is_err());
        assert!(repo.short_head_sha().is_err());
    }
}
