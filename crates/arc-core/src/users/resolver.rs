//! Free-text name resolution
//!
//! Turns partial usernames or real names into canonical usernames. Each
//! fragment is matched against the enabled accounts using the first rule
//! that yields any candidates:
//!
//! 1. exact username (case-insensitive)
//! 2. exact real name (case-insensitive)
//! 3. username substring
//! 4. real name substring
//!
//! More than one candidate is handed to a [`Chooser`].

use super::directory::{UserDirectory, UserQuery};
use crate::error::{ArcHelperError, Result};
use crate::types::UserRecord;
use std::cell::OnceCell;
use std::fmt;
use tracing::debug;

/// Which rule produced a candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Fragment equals the username
    ExactUsername,
    /// Fragment equals the real name
    ExactRealName,
    /// Fragment occurs inside the username
    UsernameContains,
    /// Fragment occurs inside the real name
    RealNameContains,
}

impl MatchRule {
    const ORDER: [MatchRule; 4] = [
        MatchRule::ExactUsername,
        MatchRule::ExactRealName,
        MatchRule::UsernameContains,
        MatchRule::RealNameContains,
    ];

    fn matches(self, needle: &str, user: &UserRecord) -> bool {
        match self {
            MatchRule::ExactUsername => user.username.to_lowercase() == needle,
            MatchRule::ExactRealName => user.real_name.to_lowercase() == needle,
            MatchRule::UsernameContains => user.username.to_lowercase().contains(needle),
            MatchRule::RealNameContains => user.real_name.to_lowercase().contains(needle),
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchRule::ExactUsername => "exact username",
            MatchRule::ExactRealName => "exact real name",
            MatchRule::UsernameContains => "username substring",
            MatchRule::RealNameContains => "real name substring",
        };
        write!(f, "{}", s)
    }
}

/// Candidates found for one fragment
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    /// Rule that produced the set
    pub rule: MatchRule,
    /// Matching records, in directory order
    pub users: Vec<&'a UserRecord>,
}

/// Picks one of several ambiguous candidates
pub trait Chooser {
    /// Return the index into `candidates` of the chosen account
    fn choose_one(&self, fragment: &str, candidates: &[&UserRecord]) -> Result<usize>;
}

impl<F> Chooser for F
where
    F: Fn(&str, &[&UserRecord]) -> Result<usize>,
{
    fn choose_one(&self, fragment: &str, candidates: &[&UserRecord]) -> Result<usize> {
        self(fragment, candidates)
    }
}

/// Chooser for non-interactive runs: every ambiguity is an error
#[derive(Debug, Clone, Copy, Default)]
pub struct RefuseAmbiguity;

impl Chooser for RefuseAmbiguity {
    fn choose_one(&self, fragment: &str, candidates: &[&UserRecord]) -> Result<usize> {
        let names: Vec<&str> = candidates.iter().map(|u| u.username.as_str()).collect();
        Err(ArcHelperError::Selection(format!(
            "'{}' is ambiguous ({}) and no prompt is available",
            fragment,
            names.join(", ")
        )))
    }
}

/// Anything that can turn fragments into canonical usernames
pub trait ResolveNames {
    /// Resolve each fragment, preserving order and duplicates
    fn resolve(&self, fragments: &[String]) -> Result<Vec<String>>;
}

/// Resolves name fragments against a [`UserDirectory`]
///
/// The directory is queried at most once, on the first call to
/// [`NameResolver::resolve`], and the roster is reused afterwards.
pub struct NameResolver<Q, C> {
    directory: UserDirectory<Q>,
    chooser: C,
    roster: OnceCell<Vec<UserRecord>>,
}

impl<Q: UserQuery, C: Chooser> NameResolver<Q, C> {
    /// Create a resolver
    pub fn new(directory: UserDirectory<Q>, chooser: C) -> Self {
        Self {
            directory,
            chooser,
            roster: OnceCell::new(),
        }
    }

    /// Enabled accounts, fetching them on first use
    pub fn roster(&self) -> Result<&[UserRecord]> {
        if let Some(users) = self.roster.get() {
            return Ok(users);
        }
        let users: Vec<UserRecord> = self
            .directory
            .fetch_all()?
            .into_iter()
            .filter(|u| !u.is_disabled())
            .collect();
        Ok(self.roster.get_or_init(|| users))
    }

    /// Resolve a single fragment
    pub fn resolve_one(&self, fragment: &str) -> Result<String> {
        let roster = self.roster()?;
        let candidates = find_candidates(roster, fragment)
            .ok_or_else(|| ArcHelperError::NoSuchUser(fragment.to_string()))?;

        debug!(
            "'{}' matched {} user(s) by {}",
            fragment,
            candidates.users.len(),
            candidates.rule
        );

        if let [only] = candidates.users.as_slice() {
            return Ok(only.username.clone());
        }

        let index = self.chooser.choose_one(fragment, &candidates.users)?;
        candidates
            .users
            .get(index)
            .map(|u| u.username.clone())
            .ok_or_else(|| {
                ArcHelperError::Selection(format!(
                    "choice {} is out of range for '{}' ({} candidates)",
                    index,
                    fragment,
                    candidates.users.len()
                ))
            })
    }
}

impl<Q: UserQuery, C: Chooser> ResolveNames for NameResolver<Q, C> {
    fn resolve(&self, fragments: &[String]) -> Result<Vec<String>> {
        fragments.iter().map(|f| self.resolve_one(f)).collect()
    }
}

/// Find the candidate set for a fragment, or `None` if nothing matches.
///
/// `users` is expected to already exclude disabled accounts; any that slip
/// through are skipped. An empty fragment matches every account.
pub fn find_candidates<'a>(users: &'a [UserRecord], fragment: &str) -> Option<Candidates<'a>> {
    let enabled = users.iter().filter(|u| !u.is_disabled());

    if fragment.is_empty() {
        let all: Vec<_> = enabled.collect();
        return (!all.is_empty()).then_some(Candidates {
            rule: MatchRule::UsernameContains,
            users: all,
        });
    }

    let needle = fragment.to_lowercase();
    MatchRule::ORDER.into_iter().find_map(|rule| {
        let matched: Vec<_> = enabled
            .clone()
            .filter(|u| rule.matches(&needle, u))
            .collect();
        (!matched.is_empty()).then_some(Candidates {
            rule,
            users: matched,
        })
    })
}


#[cfg(test)]
mod tests {
    use super::testing::{resolver, roster, LastChoice};
    use super::*;
    use crate::users::directory::StaticUsers;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn resolve(fragments: &[&str]) -> Result<Vec<String>> {
        let fragments: Vec<String> = fragments.iter().map(|s| s.to_string()).collect();
        resolver().resolve(&fragments)
    }

    #[test]
    fn test_exact_username_match() {
        assert_eq!(resolve(&["csilvers"]).unwrap(), vec!["csilvers"]);
    }

    #[test]
    fn test_partial_username_match() {
        assert_eq!(resolve(&["silver"]).unwrap(), vec!["csilvers"]);
    }

    #[test]
    fn test_exact_realname_match() {
        assert_eq!(resolve(&["Craig Silverstein"]).unwrap(), vec!["csilvers"]);
    }

    #[test]
    fn test_partial_realname_match() {
        assert_eq!(resolve(&["stein"]).unwrap(), vec!["csilvers"]);
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(resolve(&["upper"]).unwrap(), vec!["Upper"]);
        assert_eq!(resolve(&["UPPERCASE"]).unwrap(), vec!["Upper"]);
    }

    #[test]
    fn test_ambiguous_match_uses_chooser() {
        // bjb, echo and toom all have "ben" in their real names.
        assert_eq!(resolve(&["ben"]).unwrap(), vec!["toom"]);
    }

    #[test]
    fn test_candidates_are_offered_in_directory_order() {
        let seen = RefCell::new(Vec::new());
        let chooser = |_: &str, candidates: &[&UserRecord]| -> Result<usize> {
            seen.borrow_mut()
                .extend(candidates.iter().map(|u| u.username.clone()));
            Ok(0)
        };
        let resolver = NameResolver::new(UserDirectory::new(StaticUsers::new(roster())), chooser);
        let resolved = resolver.resolve(&["ben".to_string()]).unwrap();
        assert_eq!(resolved, vec!["bjb"]);
        assert_eq!(*seen.borrow(), vec!["bjb", "echo", "toom"]);
    }

    #[test]
    fn test_exact_match_short_circuits_substrings() {
        let users = vec![
            UserRecord::new("ben", "Ben Bentastick"),
            UserRecord::new("benjamin", "Benjamin Other"),
        ];
        let resolver = NameResolver::new(
            UserDirectory::new(StaticUsers::new(users)),
            RefuseAmbiguity,
        );
        assert_eq!(resolver.resolve_one("BEN").unwrap(), "ben");
    }

    #[test]
    fn test_no_username_match() {
        let err = resolve(&["nobody"]).unwrap_err();
        assert!(matches!(err, ArcHelperError::NoSuchUser(ref f) if f == "nobody"));
    }

    #[test]
    fn test_empty_fragment_offers_full_roster() {
        let users = roster();
        let candidates = find_candidates(&users, "").unwrap();
        assert_eq!(candidates.users.len(), 6);
        assert_eq!(resolve(&[""]).unwrap(), vec!["admin1"]);
    }

    #[test]
    fn test_multiple_inputs_preserve_order() {
        assert_eq!(resolve(&["csilvers", "ben"]).unwrap(), vec!["csilvers", "toom"]);
        assert_eq!(resolve(&["ben", "csilvers"]).unwrap(), vec!["toom", "csilvers"]);
    }

    #[test]
    fn test_does_not_remove_duplicates() {
        assert_eq!(resolve(&["echoman", "chom"]).unwrap(), vec!["echo", "echo"]);
    }

    #[test]
    fn test_ignores_disabled_users() {
        assert_eq!(resolve(&["admin"]).unwrap(), vec!["admin1"]);
    }

    #[test]
    fn test_ignores_disabled_users_no_results() {
        let err = resolve(&["disabled"]).unwrap_err();
        assert!(matches!(err, ArcHelperError::NoSuchUser(_)));
    }

    #[test]
    fn test_enabled_and_disabled_match_does_not_prompt() {
        let resolver = NameResolver::new(
            UserDirectory::new(StaticUsers::new(roster())),
            RefuseAmbiguity,
        );
        assert_eq!(resolver.resolve_one("admin").unwrap(), "admin1");
    }

    #[test]
    fn test_refuse_ambiguity() {
        let resolver = NameResolver::new(
            UserDirectory::new(StaticUsers::new(roster())),
            RefuseAmbiguity,
        );
        let err = resolver.resolve_one("ben").unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_out_of_range_choice() {
        let chooser = |_: &str, _: &[&UserRecord]| -> Result<usize> { Ok(99) };
        let resolver = NameResolver::new(UserDirectory::new(StaticUsers::new(roster())), chooser);
        let err = resolver.resolve_one("ben").unwrap_err();
        assert!(matches!(err, ArcHelperError::Selection(_)));
    }

    #[test]
    fn test_roster_fetched_once() {
        use std::cell::Cell;

        struct Counting(Cell<usize>);
        impl UserQuery for Counting {
            fn query_users(&self) -> Result<Vec<UserRecord>> {
                self.0.set(self.0.get() + 1);
                Ok(roster())
            }
        }

        let query = Counting(Cell::new(0));
        let resolver = NameResolver::new(UserDirectory::new(&query), LastChoice);
        resolver.resolve_one("csilvers").unwrap();
        resolver.resolve_one("echo").unwrap();
        assert_eq!(query.0.get(), 1);
    }
}
