//! arc-integration - Integration library for arc-helper
//!
//! This crate connects arc-helper to the programs it wraps.
//!
//! ## Features
//!
//! - Conduit-backed user directory
//! - Git-backed upstream branch lookup
//! - Environment verification for `doctor`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arc_core::users::{NameResolver, RefuseAmbiguity, UserDirectory};
//! use arc_integration::ConduitUserQuery;
//!
//! let directory = UserDirectory::new(ConduitUserQuery::new("arc", "user.query"));
//! let resolver = NameResolver::new(directory, RefuseAmbiguity);
//! println!("{}", resolver.resolve_one("silver")?);
//! ```

pub mod conduit;
pub mod git;
pub mod verification;

pub use conduit::ConduitUserQuery;
pub use git::GitBranchQuery;
pub use verification::VerificationResult;
