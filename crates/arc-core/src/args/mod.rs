//! Command-line argument rewriting for the underlying tool

pub mod land;
pub mod reviewers;

pub use land::{add_onto_for_land, BranchQuery};
pub use reviewers::{ReviewerFlagRewriter, ReviewerFlags};
