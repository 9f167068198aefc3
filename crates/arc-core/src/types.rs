//! Core type definitions for arc-helper

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Role marking an account that can no longer be assigned reviews
pub const DISABLED_ROLE: &str = "disabled";

/// One account as reported by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Canonical username
    #[serde(rename = "userName")]
    pub username: String,
    /// Display name
    #[serde(rename = "realName", default)]
    pub real_name: String,
    /// Account roles (e.g. "admin", "disabled")
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl UserRecord {
    /// Create a record with no roles
    pub fn new(username: impl Into<String>, real_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            real_name: real_name.into(),
            roles: BTreeSet::new(),
        }
    }

    /// Add a role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Whether the account is disabled
    pub fn is_disabled(&self) -> bool {
        self.roles.contains(DISABLED_ROLE)
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.real_name.is_empty() {
            write!(f, "{}", self.username)
        } else {
            write!(f, "{} ({})", self.username, self.real_name)
        }
    }
}

/// Source of the current time
pub trait Clock {
    /// Current local time
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_from_conduit_json() {
        let json = r#"{
            "phid": "PHID-USER-00000000000000000000",
            "userName": "csilvers",
            "realName": "Craig Silverstein",
            "image": "",
            "roles": ["admin"]
        }"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "csilvers");
        assert_eq!(user.real_name, "Craig Silverstein");
        assert!(user.roles.contains("admin"));
        assert!(!user.is_disabled());
    }

    #[test]
    fn test_disabled_role() {
        let user = UserRecord::new("admin2", "Disabled Admin")
            .with_role("admin")
            .with_role(DISABLED_ROLE);
        assert!(user.is_disabled());
    }

    #[test]
    fn test_display() {
        let user = UserRecord::new("echo", "Ben Echoman");
        assert_eq!(user.to_string(), "echo (Ben Echoman)");
        assert_eq!(UserRecord::new("bot", "").to_string(), "bot");
    }

    #[test]
    fn test_fixed_clock() {
        let now = Local::now();
        assert_eq!(FixedClock(now).now(), now);
    }
}
