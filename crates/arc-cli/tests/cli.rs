//! End-to-end tests for the arc-helper binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const USERS: &str = r#"[
    {"userName": "csilvers", "realName": "Craig Silverstein", "roles": ["admin"]},
    {"userName": "bjb", "realName": "Ben Bentastick", "roles": []},
    {"userName": "echo", "realName": "Ben Echoman", "roles": []},
    {"userName": "toom", "realName": "Toomany Bens", "roles": []},
    {"userName": "admin2", "realName": "Disabled Admin", "roles": ["admin", "disabled"]}
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("users.json"), USERS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("arc-helper").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("ARC_HELPER_USERS_FILE")
            .arg("--non-interactive")
            .arg("--config")
            .arg(self.path("missing-config.toml"));
        cmd
    }

    fn cmd_with_users(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--users-file").arg(self.path("users.json"));
        cmd
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn rewrite_without_reviewer_flag_is_identity() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["rewrite", "--", "diff", "--verbatim", "HEAD^"])
        .assert()
        .success()
        .stdout("diff --verbatim HEAD^\n");
}

#[test]
fn rewrite_resolves_reviewers() {
    let fx = Fixture::new();
    fx.cmd_with_users()
        .args(["rewrite", "--json", "--", "diff", "--rr", "silver,echoman", "--verbatim"])
        .assert()
        .success()
        .stdout("[\"diff\",\"--reviewers\",\"csilvers,echo\",\"--verbatim\"]\n");
}

#[test]
fn ambiguous_name_fails_without_terminal() {
    let fx = Fixture::new();
    fx.cmd_with_users()
        .args(["rewrite", "--", "--rr=ben"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'ben' is ambiguous"));
}

#[test]
fn unknown_name_fails_and_names_fragment() {
    let fx = Fixture::new();
    fx.cmd_with_users()
        .args(["resolve", "csilvers", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user matches 'nobody'"));
}

#[test]
fn resolve_prints_one_name_per_fragment() {
    let fx = Fixture::new();
    fx.cmd_with_users()
        .args(["resolve", "craig silverstein", "chom", "echoman"])
        .assert()
        .success()
        .stdout("csilvers\necho\necho\n");
}

#[test]
fn update_settings_reports_and_writes() {
    let fx = Fixture::new();
    let user = fx.path(".arcrc");
    let defaults = fx.path("default.arcrc");
    fs::write(&user, r#"{"b": "old", "mine": true}"#).unwrap();
    fs::write(&defaults, r#"{"a": 1, "b": "new"}"#).unwrap();

    fx.cmd()
        .arg("update-settings")
        .arg("--user-file")
        .arg(&user)
        .arg("--default-file")
        .arg(&defaults)
        .arg("--no-backup")
        .assert()
        .success()
        .stderr(predicate::str::contains(":a changed\n  WAS: <empty>\n  NOW: 1\n"))
        .stderr(predicate::str::contains(":b changed\n  WAS: old\n  NOW: new\n"));

    assert_eq!(
        read_json(&user),
        serde_json::json!({"b": "new", "mine": true, "a": 1})
    );

    fx.cmd()
        .arg("update-settings")
        .arg("--user-file")
        .arg(&user)
        .arg("--default-file")
        .arg(&defaults)
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"))
        .stderr(predicate::str::contains("WAS:").not());
}

#[test]
fn update_settings_respects_protected_paths() {
    let fx = Fixture::new();
    let user = fx.path(".arcrc");
    let defaults = fx.path("default.arcrc");
    let local = r#"{"editor": "vim", "arc-helper": {"do_not_auto_update": ["editor"]}}"#;
    fs::write(&user, local).unwrap();
    fs::write(&defaults, r#"{"editor": "nano"}"#).unwrap();

    fx.cmd()
        .arg("update-settings")
        .arg("--user-file")
        .arg(&user)
        .arg("--default-file")
        .arg(&defaults)
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"));

    assert_eq!(fs::read_to_string(&user).unwrap(), local);
}

#[test]
fn run_dry_run_prints_final_command() {
    let fx = Fixture::new();
    fx.cmd_with_users()
        .args(["run", "--dry-run", "--", "diff", "--rr=stein", "--rr", "toom"])
        .assert()
        .success()
        .stdout("arc diff --reviewers csilvers,toom\n");
}
