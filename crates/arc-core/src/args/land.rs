//! Implicit `--onto` for `land`
//!
//! `land` without `--onto` would land onto the default branch. When the
//! current branch tracks a local branch, land onto that instead.

use crate::error::{ArcHelperError, Result};
use tracing::debug;

/// Subcommand this rewriter applies to
pub const LAND_COMMAND: &str = "land";

/// Flag naming the land target
pub const ONTO_FLAG: &str = "--onto";

/// Trait for looking up the branch the current branch tracks
pub trait BranchQuery {
    /// Upstream of the checked-out branch (e.g. `master` or `origin/master`).
    ///
    /// Returns [`ArcHelperError::NotARepository`] outside a checkout and
    /// [`ArcHelperError::Vcs`] when the branch tracks nothing.
    fn upstream_branch(&self) -> Result<String>;
}

impl<B: BranchQuery + ?Sized> BranchQuery for &B {
    fn upstream_branch(&self) -> Result<String> {
        (**self).upstream_branch()
    }
}

/// Append `--onto <upstream>` to a `land` invocation that lacks one
pub fn add_onto_for_land<B>(args: &[String], vcs: &B) -> Result<Vec<String>>
where
    B: BranchQuery + ?Sized,
{
    if args.first().map(String::as_str) != Some(LAND_COMMAND) {
        return Ok(args.to_vec());
    }

    let onto_prefix = format!("{}=", ONTO_FLAG);
    if args
        .iter()
        .any(|a| a == ONTO_FLAG || a.starts_with(&onto_prefix))
    {
        return Ok(args.to_vec());
    }

    let upstream = match vcs.upstream_branch() {
        Ok(branch) => branch,
        Err(ArcHelperError::NotARepository) => {
            debug!("Not in a git repository, leaving land arguments alone");
            return Ok(args.to_vec());
        }
        Err(e) => {
            return Err(ArcHelperError::Land(format!(
                "the current branch is not tracking any branch ({}); \
                 pass {} explicitly",
                e, ONTO_FLAG
            )))
        }
    };

    if upstream.contains('/') {
        return Err(ArcHelperError::Land(format!(
            "the current branch tracks the remote branch '{}'; \
             land from a branch that tracks a local branch, or pass {} explicitly",
            upstream, ONTO_FLAG
        )));
    }

    debug!("Landing onto upstream branch {}", upstream);
    let mut out = args.to_vec();
    out.push(ONTO_FLAG.to_string());
    out.push(upstream);
    Ok(out)
}
