//! User directory and name resolution

pub mod directory;
pub mod resolver;

pub use directory::{StaticUsers, UserDirectory, UserQuery};
pub use resolver::{
    find_candidates, Candidates, Chooser, MatchRule, NameResolver, RefuseAmbiguity, ResolveNames,
};
