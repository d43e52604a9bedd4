use std::fmt;

/// Non-fatal issues met while resolving a version.
/// Resolution still produces a version; these are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A listed RC tag carried no `rc<digits>` suffix and was ignored
    MalformedRcTag { tag: String },
    /// Fetching tags before numbering a release candidate failed
    FetchFailed {
        remote: String,
        branch: String,
        reason: String,
    },
    /// HEAD could not be resolved, so the dev version has no local segment
    MissingCommitSha { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MalformedRcTag { tag } => {
                write!(f, "Ignoring tag '{}': no release candidate number", tag)
            }
            BoundaryWarning::FetchFailed {
                remote,
                branch,
                reason,
            } => write!(
                f,
                "Could not fetch '{}' and tags from '{}': {}. Using local tags.",
                branch, remote, reason
            ),
            BoundaryWarning::MissingCommitSha { reason } => {
                write!(f, "Cannot resolve HEAD commit ({}), omitting local version", reason)
            }
        }
    }
}
