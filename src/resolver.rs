//! Version resolution.
//!
//! Precedence, first match wins:
//! 1. `CI_COMMIT_TAG`, verbatim
//! 2. `PACKAGE_VERSION`, verbatim
//! 3. otherwise the base version from the version file, shaped by the branch:
//!    release branch as-is, pre-release branch as `{base}rc{N}`, anything
//!    else as `{base}.dev0+{slug}.{sha}`
//!
//! Git failures never abort resolution; they fall back to empty values.
//! Only an unreadable version file is an error.

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::branch::UNKNOWN_BRANCH;
use crate::domain::prerelease::rc_tag_pattern;
use crate::domain::{select_rc_number, BranchContext, BranchKind, ResolvedVersion};
use crate::env::CiEnvironment;
use crate::error::Result;
use crate::git::Repository;
use crate::version_file::read_base_version;

/// Where the branch name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSource {
    CommitBranch,
    MergeRequestSource,
    Repository,
    Fallback,
}

/// A resolved version together with the inputs that shaped it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub version: ResolvedVersion,
    /// Set when resolution reached the branch step
    pub branch: Option<(String, BranchSource)>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Computes the build version from the environment, repository, and version file
pub struct VersionResolver<'a> {
    repo: &'a dyn Repository,
    config: &'a Config,
}

/// Collapse a git query failure to an empty string
fn or_empty(query: &str, result: Result<String>) -> String {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::debug!("{} failed: {}", query, e);
            String::new()
        }
    }
}

impl<'a> VersionResolver<'a> {
    pub fn new(repo: &'a dyn Repository, config: &'a Config) -> Self {
        VersionResolver { repo, config }
    }

    /// Resolve the version string for the given environment.
    ///
    /// # Returns
    /// * `Ok(Resolution)` - The version and any warnings raised on the way
    /// * `Err` - If the version file had to be read and could not be
    pub fn resolve(&self, env: &CiEnvironment) -> Result<Resolution> {
        if let Some(tag) = env.commit_tag() {
            log::info!("using CI_COMMIT_TAG {}", tag);
            return Ok(Resolution {
                version: ResolvedVersion::Tag(tag.to_string()),
                branch: None,
                warnings: Vec::new(),
            });
        }

        if let Some(forced) = env.package_version() {
            log::info!("using PACKAGE_VERSION override {}", forced);
            return Ok(Resolution {
                version: ResolvedVersion::Override(forced.to_string()),
                branch: None,
                warnings: Vec::new(),
            });
        }

        let (branch_name, source) = self.determine_branch(env);
        if let Some(target) = env.merge_request_target_branch() {
            log::debug!("merge request targets {}", target);
        }

        let base = read_base_version(&self.config.version_file)?;
        let branch = BranchContext::classify(
            branch_name.clone(),
            &self.config.branches.release,
            &self.config.branches.prerelease,
        );
        log::info!(
            "branch {} ({:?}) with base version {}",
            branch.name,
            branch.kind,
            base
        );

        let mut warnings = Vec::new();
        let version = match branch.kind {
            BranchKind::Release => ResolvedVersion::Release { base },
            BranchKind::Prerelease => self.release_candidate(base, &branch, &mut warnings),
            BranchKind::Feature => self.dev_build(base, &branch, &mut warnings),
        };

        Ok(Resolution {
            version,
            branch: Some((branch_name, source)),
            warnings,
        })
    }

    /// First non-empty of the CI branch, the merge request source branch,
    /// the checked-out branch, and `"unknown"`.
    fn determine_branch(&self, env: &CiEnvironment) -> (String, BranchSource) {
        if let Some(branch) = env.commit_branch() {
            return (branch.to_string(), BranchSource::CommitBranch);
        }

        if let Some(branch) = env.merge_request_source_branch() {
            return (branch.to_string(), BranchSource::MergeRequestSource);
        }

        let local = or_empty("git rev-parse --abbrev-ref HEAD", self.repo.current_branch());
        if !local.is_empty() {
            return (local, BranchSource::Repository);
        }

        (UNKNOWN_BRANCH.to_string(), BranchSource::Fallback)
    }

    fn release_candidate(
        &self,
        base: String,
        branch: &BranchContext,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> ResolvedVersion {
        if self.config.fetch {
            if let Err(e) = self.repo.fetch_tags(&self.config.remote, &branch.name) {
                warnings.push(BoundaryWarning::FetchFailed {
                    remote: self.config.remote.clone(),
                    branch: branch.name.clone(),
                    reason: e.to_string(),
                });
            }
        }

        let pattern = rc_tag_pattern(&base);
        let tags = self.repo.list_tags(&pattern).unwrap_or_else(|e| {
            log::debug!("git tag --list {} failed: {}", pattern, e);
            Vec::new()
        });

        let selection = select_rc_number(&tags, self.config.prerelease.strategy);
        warnings.extend(
            selection
                .malformed
                .into_iter()
                .map(|tag| BoundaryWarning::MalformedRcTag { tag }),
        );

        ResolvedVersion::ReleaseCandidate {
            base,
            rc: selection.number,
        }
    }

    fn dev_build(
        &self,
        base: String,
        branch: &BranchContext,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> ResolvedVersion {
        let sha = match self.repo.short_head_sha() {
            Ok(sha) if !sha.is_empty() => Some(sha),
            Ok(_) => None,
            Err(e) => {
                warnings.push(BoundaryWarning::MissingCommitSha {
                    reason: e.to_string(),
                });
                None
            }
        };

        ResolvedVersion::Dev {
            base,
            slug: branch.slug(),
            sha,
        }
    }
}
