use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of a branch slug
pub const MAX_SLUG_LEN: usize = 40;

/// Branch name used when nothing else is known
pub const UNKNOWN_BRANCH: &str = "unknown";

/// How a branch participates in versioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchKind {
    /// Release branch: the base version is published as-is
    Release,
    /// Pre-release branch: release candidates
    Prerelease,
    /// Everything else: development builds
    Feature,
}

/// Represents a git branch with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub kind: BranchKind,
}

impl BranchContext {
    /// Classify `name` against the configured release and pre-release branch names
    pub fn classify(name: impl Into<String>, release: &str, prerelease: &str) -> Self {
        let name = name.into();
        let kind = if name == release {
            BranchKind::Release
        } else if name == prerelease {
            BranchKind::Prerelease
        } else {
            BranchKind::Feature
        };

        BranchContext { name, kind }
    }

    /// URL-safe form of the branch name
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

fn non_alphanumeric_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug regex is valid"))
}

/// Normalise a branch name for use in a local version segment.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, trims hyphens from both ends and truncates to
/// [`MAX_SLUG_LEN`] characters. Falls back to `"unknown"` when nothing is left.
pub fn slugify(branch: &str) -> String {
    let lowered = branch.to_lowercase();
    let replaced = non_alphanumeric_runs().replace_all(&lowered, "-");
    // Only ASCII survives the replacement, so char and byte counts agree.
    let slug: String = replaced.trim_matches('-').chars().take(MAX_SLUG_LEN).collect();

    if slug.is_empty() {
        UNKNOWN_BRANCH.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_branch() {
        let branch = BranchContext::classify("main", "main", "develop");
        assert_eq!(branch.kind, BranchKind::Release);
    }

    #[test]
    fn test_develop_branch() {
        let branch = BranchContext::classify("develop", "main", "develop");
        assert_eq!(branch.kind, BranchKind::Prerelease);
    }

    #[test]
    fn test_master_is_not_release_by_default() {
        let branch = BranchContext::classify("master", "main", "develop");
        assert_eq!(branch.kind, BranchKind::Feature);
    }

    #[test]
    fn test_custom_branch_names() {
        let branch = BranchContext::classify("trunk", "trunk", "next");
        assert_eq!(branch.kind, BranchKind::Release);
        let branch = BranchContext::classify("next", "trunk", "next");
        assert_eq!(branch.kind, BranchKind::Prerelease);
    }

    #[test]
    fn test_slugify_feature_branch() {
        assert_eq!(slugify("feature/foo_BAR"), "feature-foo-bar");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("--Fix//Login  Bug--"), "fix-login-bug");
        assert_eq!(slugify("release/1.2.x"), "release-1-2-x");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(60);
        assert_eq!(slugify(&long).len(), MAX_SLUG_LEN);
    }

    #[test]
    fn test_slugify_truncation_can_leave_trailing_hyphen() {
        // Trimming happens before truncation.
        let name = format!("{}-tail", "a".repeat(39));
        assert_eq!(slugify(&name), format!("{}-", "a".repeat(39)));
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify(""), "unknown");
        assert_eq!(slugify("///"), "unknown");
        assert_eq!(slugify("ümlaut"), "mlaut");
    }

    #[test]
    fn test_context_slug() {
        let branch = BranchContext::classify("Dev/Feature_1", "main", "develop");
        assert_eq!(branch.slug(), "dev-feature-1");
    }
}
