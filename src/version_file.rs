//! Extraction of the base version from a `__version__ = "X"` assignment.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, VersionError};

/// Base version used when the file has no matching assignment
pub const DEFAULT_BASE_VERSION: &str = "0.0.0";

fn assignment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"__version__\s*=\s*["'](.+)["']"#).expect("version assignment regex is valid")
    })
}

/// Scan text for the first line assigning `__version__`.
///
/// Lines that mention `__version__` without a quoted assignment are skipped.
/// Returns `None` when nothing matches.
pub fn parse_base_version(contents: &str) -> Option<String> {
    contents
        .lines()
        .filter(|line| line.contains("__version__"))
        .find_map(|line| {
            assignment_regex()
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}

/// Read the base version from `path`.
///
/// # Returns
/// * `Ok(String)` - The assigned version, or `"0.0.0"` if no line matches
/// * `Err` - If the file is missing or unreadable
pub fn read_base_version(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|e| {
        VersionError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read version file '{}': {}", path.display(), e),
        ))
    })?;

    match parse_base_version(&contents) {
        Some(version) => Ok(version),
        None => {
            log::info!(
                "no __version__ assignment in {}, using {}",
                path.display(),
                DEFAULT_BASE_VERSION
            );
            Ok(DEFAULT_BASE_VERSION.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_double_quotes() {
        let src = "\"\"\"Package.\"\"\"\n__version__ = \"1.0.0\"\n";
        assert_eq!(parse_base_version(src), Some("1.0.0".to_string()));
    }

    #[test]
    fn test_parse_single_quotes_no_spaces() {
        assert_eq!(
            parse_base_version("__version__='2.3.4'"),
            Some("2.3.4".to_string())
        );
    }

    #[test]
    fn test_parse_first_match_wins() {
        let src = "__version__ = \"1.0.0\"\n__version__ = \"2.0.0\"\n";
        assert_eq!(parse_base_version(src), Some("1.0.0".to_string()));
    }

    #[test]
    fn test_parse_skips_mentions_without_assignment() {
        let src = "# bump __version__ before release\n__version__ = \"3.1.0\"\n";
        assert_eq!(parse_base_version(src), Some("3.1.0".to_string()));
    }

    #[test]
    fn test_parse_no_match() {
        assert_eq!(parse_base_version("VERSION = \"1.0.0\"\n"), None);
        assert_eq!(parse_base_version(""), None);
    }

    #[test]
    fn test_read_defaults_when_missing_assignment() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "import os").unwrap();
        file.flush().unwrap();

        assert_eq!(read_base_version(file.path()).unwrap(), "0.0.0");
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_base_version(&dir.path().join("nope.py")).unwrap_err();
        assert!(matches!(err, VersionError::Io(_)));
        assert!(err.to_string().contains("nope.py"));
    }
}
