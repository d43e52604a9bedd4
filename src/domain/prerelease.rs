//! Release candidate numbering.
//!
//! Release candidates are tagged `{base}rc{N}`. The next candidate number is
//! derived from the tags already present for the same base version.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the RC number is derived from the existing tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RcStrategy {
    /// Reuse the highest existing RC number
    #[default]
    Reuse,
    /// One past the highest existing RC number
    Next,
}

/// Glob passed to the tag listing for a base version
pub fn rc_tag_pattern(base_version: &str) -> String {
    format!("{}rc*", base_version)
}

fn rc_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only, the same set `u64::from_str` accepts.
    RE.get_or_init(|| Regex::new(r"rc([0-9]+)").expect("rc suffix regex is valid"))
}

/// Extract the RC number from a tag like `1.0.0rc3`.
///
/// Returns `None` for tags with no `rc<digits>` part, where only ASCII
/// digits count, or a number too large to represent.
pub fn rc_number(tag: &str) -> Option<u64> {
    rc_suffix_regex()
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Outcome of choosing an RC number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcSelection {
    pub number: u64,
    /// Listed tags that carried no usable RC number
    pub malformed: Vec<String>,
}

/// Choose the RC number for the given listed tags.
///
/// Without any parseable tag the number is 1 under either strategy.
pub fn select_rc_number(tags: &[String], strategy: RcStrategy) -> RcSelection {
    let mut malformed = Vec::new();
    let mut highest: Option<u64> = None;

    for tag in tags {
        match rc_number(tag) {
            Some(n) => highest = Some(highest.map_or(n, |h| h.max(n))),
            None => malformed.push(tag.clone()),
        }
    }

    let number = match (highest, strategy) {
        (None, _) => 1,
        (Some(n), RcStrategy::Reuse) => n,
        (Some(n), RcStrategy::Next) => n.saturating_add(1),
    };

    RcSelection { number, malformed }
}
