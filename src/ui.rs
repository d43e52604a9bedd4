//! Diagnostic output. Everything here goes to stderr; stdout carries only
//! the version.

use crate::boundary::BoundaryWarning;
use crate::domain::ResolvedVersion;
use crate::resolver::{BranchSource, Resolution};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a boundary warning in yellow.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33mWARNING:\x1b[0m {}", warning);
}

fn describe_source(source: BranchSource) -> &'static str {
    match source {
        BranchSource::CommitBranch => "CI_COMMIT_BRANCH",
        BranchSource::MergeRequestSource => "CI_MERGE_REQUEST_SOURCE_BRANCH_NAME",
        BranchSource::Repository => "git HEAD",
        BranchSource::Fallback => "fallback",
    }
}

/// Describe which rule produced the version and from what inputs.
pub fn format_explanation(resolution: &Resolution) -> String {
    let mut lines = vec![format!("rule: {}", resolution.version.rule())];

    if let Some((branch, source)) = &resolution.branch {
        lines.push(format!("branch: {} (from {})", branch, describe_source(*source)));
    }

    match &resolution.version {
        ResolvedVersion::Tag(_) => lines.push("source: CI_COMMIT_TAG".to_string()),
        ResolvedVersion::Override(_) => lines.push("source: PACKAGE_VERSION".to_string()),
        ResolvedVersion::Release { base } => lines.push(format!("base version: {}", base)),
        ResolvedVersion::ReleaseCandidate { base, rc } => {
            lines.push(format!("base version: {}", base));
            lines.push(format!("release candidate: {}", rc));
        }
        ResolvedVersion::Dev { base, slug, sha } => {
            lines.push(format!("base version: {}", base));
            lines.push(format!("slug: {}", slug));
            lines.push(format!("commit: {}", sha.as_deref().unwrap_or("(none)")));
        }
    }

    lines.push(format!("version: {}", resolution.version));
    lines.join("\n")
}

/// Print the explanation in bold-prefixed lines.
pub fn display_explanation(resolution: &Resolution) {
    for line in format_explanation(resolution).lines() {
        eprintln!("\x1b[1m→\x1b[0m {}", line);
    }
}
