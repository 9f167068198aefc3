//! Reviewer flag rewriting
//!
//! Collapses every `--rr=A,B` / `--rr A,B` occurrence into one
//! `--reviewers` flag carrying canonical usernames.

use crate::error::{ArcHelperError, Result};
use crate::users::ResolveNames;
use tracing::debug;

/// Legacy repeatable reviewer flag
pub const LEGACY_REVIEWER_FLAG: &str = "--rr";

/// Flag the underlying tool understands
pub const CANONICAL_REVIEWER_FLAG: &str = "--reviewers";

/// Legacy flag occurrences pulled out of an argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerFlags {
    /// Arguments with every legacy flag (and its value) removed
    pub remaining: Vec<String>,
    /// Index into `remaining` where the first legacy flag stood
    pub insert_at: usize,
    /// Fragments of each occurrence, in order
    pub groups: Vec<Vec<String>>,
}

impl ReviewerFlags {
    /// All fragments, flattened in encounter order
    pub fn fragments(&self) -> Vec<String> {
        self.groups.iter().flatten().cloned().collect()
    }
}

/// Rewrites the legacy reviewer flag into the canonical one
#[derive(Debug, Clone)]
pub struct ReviewerFlagRewriter {
    legacy_flag: String,
    canonical_flag: String,
}

impl Default for ReviewerFlagRewriter {
    fn default() -> Self {
        Self::new(LEGACY_REVIEWER_FLAG, CANONICAL_REVIEWER_FLAG)
    }
}

impl ReviewerFlagRewriter {
    /// Create a rewriter for custom flag names
    pub fn new(legacy_flag: impl Into<String>, canonical_flag: impl Into<String>) -> Self {
        Self {
            legacy_flag: legacy_flag.into(),
            canonical_flag: canonical_flag.into(),
        }
    }

    /// Pull legacy flag occurrences out of `args`.
    ///
    /// Returns `Ok(None)` when the flag does not occur.
    pub fn extract(&self, args: &[String]) -> Result<Option<ReviewerFlags>> {
        let with_equals = format!("{}=", self.legacy_flag);
        let mut remaining = Vec::with_capacity(args.len());
        let mut insert_at = None;
        let mut groups = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let value = if *arg == self.legacy_flag {
                iter.next()
                    .ok_or_else(|| ArcHelperError::MissingFlagValue(self.legacy_flag.clone()))?
                    .as_str()
            } else if let Some(value) = arg.strip_prefix(&with_equals) {
                value
            } else {
                remaining.push(arg.clone());
                continue;
            };

            insert_at.get_or_insert(remaining.len());
            // Empty pieces are kept; they match the whole roster.
            groups.push(value.split(',').map(str::to_string).collect::<Vec<_>>());
        }

        Ok(insert_at.map(|insert_at| ReviewerFlags {
            remaining,
            insert_at,
            groups,
        }))
    }

    /// Rewrite `args`, resolving every reviewer fragment through `resolver`.
    ///
    /// Arguments without the legacy flag are returned unchanged and the
    /// resolver is not consulted.
    pub fn rewrite<R>(&self, args: &[String], resolver: &R) -> Result<Vec<String>>
    where
        R: ResolveNames + ?Sized,
    {
        let Some(flags) = self.extract(args)? else {
            return Ok(args.to_vec());
        };

        let fragments = flags.fragments();
        let resolved = resolver.resolve(&fragments)?;
        if resolved.len() != fragments.len() {
            return Err(ArcHelperError::Selection(format!(
                "resolved {} names for {} fragments",
                resolved.len(),
                fragments.len()
            )));
        }

        let mut resolved = resolved.into_iter();
        let per_flag: Vec<String> = flags
            .groups
            .iter()
            .map(|group| resolved.by_ref().take(group.len()).collect::<Vec<_>>().join(","))
            .collect();
        let reviewers = per_flag.join(",");
        debug!(
            "Rewrote {} {} flag(s) to {} {}",
            flags.groups.len(),
            self.legacy_flag,
            self.canonical_flag,
            reviewers
        );

        let mut out = flags.remaining;
        let at = flags.insert_at;
        out.splice(at..at, [self.canonical_flag.clone(), reviewers]);
        Ok(out)
    }
}
