//! User directory wrapper

use crate::error::{ArcHelperError, Result};
use crate::types::UserRecord;
use tracing::debug;

/// Trait for the remote user query
pub trait UserQuery {
    /// Fetch every account, in the order the directory returns them
    fn query_users(&self) -> Result<Vec<UserRecord>>;
}

impl<Q: UserQuery + ?Sized> UserQuery for &Q {
    fn query_users(&self) -> Result<Vec<UserRecord>> {
        (**self).query_users()
    }
}

impl<Q: UserQuery + ?Sized> UserQuery for Box<Q> {
    fn query_users(&self) -> Result<Vec<UserRecord>> {
        (**self).query_users()
    }
}

/// Normalizing wrapper around a [`UserQuery`]
pub struct UserDirectory<Q> {
    query: Q,
}

impl<Q: UserQuery> UserDirectory<Q> {
    /// Create a directory backed by the given query
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    /// Run the query once and return its records unchanged in order.
    ///
    /// Any failure is reported as [`ArcHelperError::DirectoryUnavailable`].
    /// No retries are attempted.
    pub fn fetch_all(&self) -> Result<Vec<UserRecord>> {
        let users = self.query.query_users().map_err(|e| match e {
            ArcHelperError::DirectoryUnavailable(_) => e,
            other => ArcHelperError::DirectoryUnavailable(other.to_string()),
        })?;
        debug!("Fetched {} users from directory", users.len());
        Ok(users)
    }
}

/// A fixed roster, for tests and offline use
#[derive(Debug, Clone, Default)]
pub struct StaticUsers {
    users: Vec<UserRecord>,
}

impl StaticUsers {
    /// Create a roster from records
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }
}

impl UserQuery for StaticUsers {
    fn query_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.users.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FailingQuery;

    impl UserQuery for FailingQuery {
        fn query_users(&self) -> Result<Vec<UserRecord>> {
            Err(ArcHelperError::Command {
                command: "arc call-conduit user.query".to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    struct CountingQuery {
        calls: Cell<usize>,
    }

    impl UserQuery for CountingQuery {
        fn query_users(&self) -> Result<Vec<UserRecord>> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![UserRecord::new("b", "B"), UserRecord::new("a", "A")])
        }
    }

    #[test]
    fn test_fetch_all_preserves_order() {
        let query = CountingQuery { calls: Cell::new(0) };
        let directory = UserDirectory::new(&query);
        let users = directory.fetch_all().unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(query.calls.get(), 1);
    }

    #[test]
    fn test_fetch_all_keeps_disabled_records() {
        let directory = UserDirectory::new(StaticUsers::new(vec![
            UserRecord::new("admin2", "Disabled Admin").with_role("disabled"),
        ]));
        assert_eq!(directory.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn test_failure_becomes_directory_unavailable() {
        let directory = UserDirectory::new(FailingQuery);
        let err = directory.fetch_all().unwrap_err();
        match err {
            ArcHelperError::DirectoryUnavailable(msg) => {
                assert!(msg.contains("connection refused"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
