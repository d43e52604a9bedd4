//! Domain logic - pure versioning rules independent of git and the environment

pub mod branch;
pub mod prerelease;
pub mod version;

pub use branch::{slugify, BranchContext, BranchKind};
pub use prerelease::{select_rc_number, RcSelection, RcStrategy};
pub use version::ResolvedVersion;
