pub mod boundary;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod git;
pub mod resolver;
pub mod ui;
pub mod version_file;

pub use error::{Result, VersionError};
pub use resolver::{Resolution, VersionResolver};
