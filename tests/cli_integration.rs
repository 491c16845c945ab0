//! End-to-end tests for the `gitsim` binary.
//!
//! Every test points the binary at a session file and config inside its own
//! temp directory, so nothing under the real home directory is touched.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    fn write_config(&self, contents: &str) {
        fs::write(self.dir.path().join("config.toml"), contents).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("gitsim").unwrap();
        cmd.env("HOME", self.dir.path())
            .env_remove("GITSIM_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .arg("--session")
            .arg(self.session_path());
        cmd
    }

    fn git(&self, line: &str) -> assert_cmd::assert::Assert {
        self.cmd()
            .arg("run")
            .args(line.split_whitespace())
            .assert()
    }
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("gitsim")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("reset-session"));
}

#[test]
fn status_on_fresh_session() {
    let sb = Sandbox::new();
    sb.git("git status")
        .success()
        .stdout(predicate::str::contains("On branch main"))
        .stdout(predicate::str::contains("HEAD: c1"));
}

#[test]
fn add_and_commit_persist_between_runs() {
    let sb = Sandbox::new();
    sb.git("git add app.js")
        .success()
        .stdout(predicate::str::contains("Staged app.js."));
    sb.git("git commit -m tweak")
        .success()
        .stdout(predicate::str::contains("[main c2] tweak"));

    assert!(sb.session_path().exists());
    sb.git("git log")
        .success()
        .stdout(predicate::str::contains("commit c2 (HEAD)"))
        .stdout(predicate::str::contains("Parents: c1"));
}

#[test]
fn reset_flag_is_passed_through() {
    let sb = Sandbox::new();
    sb.git("git add app.js").success();
    sb.git("git commit -m two").success();
    sb.git("git reset --hard HEAD~1")
        .success()
        .stdout(predicate::str::contains("HEAD is now at c1."));
}

#[test]
fn failed_command_exits_nonzero_and_keeps_history() {
    let sb = Sandbox::new();
    sb.git("svn status")
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: \"svn\" is not a git command."));

    sb.cmd()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("svn status"));
}

#[test]
fn failed_command_leaves_repository_alone() {
    let sb = Sandbox::new();
    sb.git("git checkout nowhere")
        .failure()
        .stderr(predicate::str::contains("No such branch or commit \"nowhere\"."));
    sb.cmd()
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::diff("main (HEAD) -> c1\n"));
}

#[test]
fn edit_then_show_diff() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["edit", "app.js", "console.log('bye');"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Edited app.js (modified)."));
    sb.git("git add app.js").success();
    sb.git("git commit -m bye").success();

    sb.cmd()
        .args(["show", "c2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commit c2 (parent c1)"))
        .stdout(predicate::str::contains("-console.log('hello');"))
        .stdout(predicate::str::contains("+console.log('bye');"));
}

#[test]
fn edit_unknown_file_fails() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["edit", "nope.txt", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file \"nope.txt\"."));
}

#[test]
fn show_unknown_commit_fails() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["show", "c9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("commit \"c9\" not found."));
}

#[test]
fn repl_keeps_going_after_errors() {
    let sb = Sandbox::new();
    sb.cmd()
        .arg("repl")
        .write_stdin("git add app.js\n\ngit push\ngit commit -m x\n!!\nexit\ngit status\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[main c2] x"))
        .stderr(predicate::str::contains("unsupported git subcommand \"push\"."))
        .stderr(predicate::str::contains("Nothing to commit."));

    sb.cmd()
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("main (HEAD) -> c2"));
}

#[test]
fn reset_session_starts_over() {
    let sb = Sandbox::new();
    sb.git("git branch feature").success();
    sb.cmd().arg("reset-session").assert().success();
    sb.cmd()
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("feature").not());
}

#[test]
fn quiet_suppresses_output_but_not_errors() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["-q", "run", "git", "add", "app.js"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    sb.cmd()
        .args(["-q", "run", "git", "add", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn config_can_hide_status_after_mutations() {
    let sb = Sandbox::new();
    sb.write_config("show_status = false\n");
    sb.git("git add app.js")
        .success()
        .stdout(predicate::str::contains("Staged app.js."))
        .stdout(predicate::str::contains("On branch").not());
}

#[test]
fn invalid_config_is_reported() {
    let sb = Sandbox::new();
    sb.write_config("history_limit = 0\n");
    sb.git("git status")
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn completion_generates_script() {
    Command::cargo_bin("gitsim")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitsim"));
}
