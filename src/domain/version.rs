use std::fmt;

/// Development release number used for feature builds
pub const DEV_NUMBER: u32 = 0;

/// The version chosen for a build, tagged by the rule that produced it.
///
/// `Display` renders the PEP 440 shaped string handed to the packaging
/// toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVersion {
    /// Tag pipeline: the tag verbatim
    Tag(String),
    /// Manual override, verbatim
    Override(String),
    /// Release branch: the base version unchanged
    Release { base: String },
    /// Pre-release branch: `{base}rc{rc}`
    ReleaseCandidate { base: String, rc: u64 },
    /// Any other branch: `{base}.dev0+{slug}.{sha}`, or `{base}.dev0` without a sha
    Dev {
        base: String,
        slug: String,
        sha: Option<String>,
    },
}

impl ResolvedVersion {
    /// Short name of the rule, for diagnostics
    pub fn rule(&self) -> &'static str {
        match self {
            ResolvedVersion::Tag(_) => "tag",
            ResolvedVersion::Override(_) => "override",
            ResolvedVersion::Release { .. } => "release",
            ResolvedVersion::ReleaseCandidate { .. } => "release-candidate",
            ResolvedVersion::Dev { .. } => "dev",
        }
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedVersion::Tag(v) | ResolvedVersion::Override(v) => write!(f, "{}", v),
            ResolvedVersion::Release { base } => write!(f, "{}", base),
            ResolvedVersion::ReleaseCandidate { base, rc } => write!(f, "{}rc{}", base, rc),
            ResolvedVersion::Dev {
                base,
                slug,
                sha: Some(sha),
            } => write!(f, "{}.dev{}+{}.{}", base, DEV_NUMBER, slug, sha),
            ResolvedVersion::Dev { base, sha: None, .. } => {
                write!(f, "{}.dev{}", base, DEV_NUMBER)
            }
        }
    }
}
