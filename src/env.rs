//! Snapshot of the CI environment variables consulted during resolution.

use std::collections::HashMap;

pub const CI_COMMIT_TAG: &str = "CI_COMMIT_TAG";
pub const PACKAGE_VERSION: &str = "PACKAGE_VERSION";
pub const CI_COMMIT_BRANCH: &str = "CI_COMMIT_BRANCH";
pub const CI_MERGE_REQUEST_SOURCE_BRANCH_NAME: &str = "CI_MERGE_REQUEST_SOURCE_BRANCH_NAME";
pub const CI_MERGE_REQUEST_TARGET_BRANCH_NAME: &str = "CI_MERGE_REQUEST_TARGET_BRANCH_NAME";

/// All variables read by the resolver
pub const CI_VARIABLES: [&str; 5] = [
    CI_COMMIT_TAG,
    PACKAGE_VERSION,
    CI_COMMIT_BRANCH,
    CI_MERGE_REQUEST_SOURCE_BRANCH_NAME,
    CI_MERGE_REQUEST_TARGET_BRANCH_NAME,
];

/// Read-only view of the CI variables.
///
/// Empty values are treated the same as unset ones, so every accessor
/// returns `None` for `VAR=""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnvironment {
    vars: HashMap<String, String>,
}

impl CiEnvironment {
    /// Capture the CI variables from the current process environment
    pub fn from_process() -> Self {
        let vars = CI_VARIABLES
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
            .collect();

        CiEnvironment { vars }
    }

    /// Build a snapshot from explicit name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CiEnvironment {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn commit_tag(&self) -> Option<&str> {
        self.get(CI_COMMIT_TAG)
    }

    pub fn package_version(&self) -> Option<&str> {
        self.get(PACKAGE_VERSION)
    }

    pub fn commit_branch(&self) -> Option<&str> {
        self.get(CI_COMMIT_BRANCH)
    }

    pub fn merge_request_source_branch(&self) -> Option<&str> {
        self.get(CI_MERGE_REQUEST_SOURCE_BRANCH_NAME)
    }

    /// Captured for completeness; resolution never looks at it.
    pub fn merge_request_target_branch(&self) -> Option<&str> {
        self.get(CI_MERGE_REQUEST_TARGET_BRANCH_NAME)
    }
}
