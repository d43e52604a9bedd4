use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, VersionError};
use crate::git::Repository;

/// Repository backed by the `git` executable
pub struct CommandRepository {
    workdir: PathBuf,
}

impl CommandRepository {
    /// Run git commands from `workdir`
    pub fn new(workdir: impl AsRef<Path>) -> Self {
        CommandRepository {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Runs `git <args>` and returns its trimmed stdout.
    ///
    /// Spawn failures and non-zero exits both map to [VersionError::Command].
    fn run(&self, args: &[&str]) -> Result<String> {
        log::trace!("running git with: {:?} in {}", args, self.workdir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| VersionError::command(format!("cannot spawn git: {}", e)))?;

        if !output.status.success() {
            return Err(VersionError::command(format!(
                "git {} exited with code {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Repository for CommandRepository {
    fn current_branch(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn short_head_sha(&self) -> Result<String> {
        self.run(&["rev-parse", "--short", "HEAD"])
    }

    fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        let stdout = self.run(&["tag", "--list", pattern])?;

        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn fetch_tags(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["fetch", remote, branch, "--tags"]).map(|_| ())
    }
}
