use thiserror::Error;

/// Unified error type for ci-version operations
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Git command failed: {0}")]
    Command(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in ci-version
pub type Result<T> = std::result::Result<T, VersionError>;

impl VersionError {
    /// Create a git command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        VersionError::Command(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        VersionError::Version(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VersionError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VersionError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_git2() {
        let err: VersionError = git2::Error::from_str("bad ref").into();
        assert!(err.to_string().starts_with("Git operation failed"));
        assert!(err.to_string().contains("bad ref"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (VersionError::command("x"), "Git command failed"),
            (VersionError::config("x"), "Configuration error"),
            (VersionError::version("x"), "Version parsing error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_empty_messages() {
        let errors = vec![
            VersionError::command(""),
            VersionError::config(""),
            VersionError::version(""),
        ];

        for err in errors {
            // Even with empty message, the error type prefix should be present
            assert!(!err.to_string().is_empty());
        }
    }
}
