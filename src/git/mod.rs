//! Git operations abstraction layer
//!
//! The resolver only needs four read-mostly queries against the repository:
//! the current branch, the abbreviated HEAD commit, a tag listing filtered by
//! glob, and a best-effort fetch. They sit behind the [Repository] trait so
//! the backend can be swapped.
//!
//! - [command::CommandRepository]: spawns the `git` executable (default)
//! - [repository::Git2Repository]: in-process queries through the `git2` crate
//! - [mock::MockRepository]: fixed answers for tests
//!
//! ```rust
//! # use ci_version::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> ci_version::Result<()> {
//! let branch = repo.current_branch()?;
//! let rc_tags = repo.list_tags("1.0.0rc*")?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::CommandRepository;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// Every method reports failures through [crate::error::Result]; callers in
/// the resolver collapse those failures to empty values instead of
/// propagating them.
pub trait Repository: Send {
    /// Name of the checked-out branch (`git rev-parse --abbrev-ref HEAD`)
    ///
    /// A detached HEAD yields `"HEAD"`, matching the git CLI.
    fn current_branch(&self) -> Result<String>;

    /// Abbreviated hash of the HEAD commit (`git rev-parse --short HEAD`)
    fn short_head_sha(&self) -> Result<String>;

    /// Tag names matching a glob (`git tag --list <pattern>`)
    ///
    /// # Example
    /// ```rust
    /// # use ci_version::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> ci_version::Result<()> {
    /// for tag in repo.list_tags("2.0.0rc*")? {
    ///     println!("Tag: {}", tag);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_tags(&self, pattern: &str) -> Result<Vec<String>>;

    /// Fetch a branch and all tags from a remote (`git fetch <remote> <branch> --tags`)
    fn fetch_tags(&self, remote: &str, branch: &str) -> Result<()>;
}

/// Which implementation answers git queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// The `git` executable on PATH
    #[default]
    Cli,
    /// libgit2, linked in-process
    Libgit2,
}

/// Open the repository at `path` with the requested backend.
///
/// A libgit2 repository that cannot be opened falls back to the CLI backend,
/// whose queries then fail individually and are swallowed by the resolver.
pub fn open(backend: GitBackend, path: &Path) -> Box<dyn Repository> {
    match backend {
        GitBackend::Cli => Box::new(CommandRepository::new(path)),
        GitBackend::Libgit2 => match Git2Repository::open(path) {
            Ok(repo) => Box::new(repo),
            Err(e) => {
                log::warn!(
                    "cannot open {} with libgit2 ({}), falling back to git CLI",
                    path.display(),
                    e
                );
                Box::new(CommandRepository::new(path))
            }
        },
    }
}
