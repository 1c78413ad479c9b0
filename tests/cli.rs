//
//  atlas-cli
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! End-to-end checks of the binary's local behavior: argument handling,
//! credential resolution, fault routing and exit codes. No test here
//! touches the network; anything that would is rejected locally first.

use assert_cmd::Command;
use predicates::prelude::*;

/// Builds a command with a scrubbed environment.
fn atlas() -> Command {
    let mut cmd = Command::cargo_bin("atlas").unwrap();
    cmd.env_clear();
    cmd
}

/// Builds a command with syntactically valid credentials pointing nowhere.
///
/// Useful for commands whose local validation runs after credential
/// resolution but before any request is issued.
fn atlas_with_env() -> Command {
    let mut cmd = atlas();
    cmd.env("ATLAS_BASE_URL", "http://127.0.0.1:9")
        .env("ATLAS_EMAIL", "dev@example.com")
        .env("ATLAS_API_TOKEN", "tok-123");
    cmd
}

#[test]
fn test_missing_configuration_names_every_variable() {
    atlas()
        .args(["project", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("Missing configuration")
                .and(predicate::str::contains("ATLAS_BASE_URL"))
                .and(predicate::str::contains("ATLAS_EMAIL"))
                .and(predicate::str::contains("ATLAS_API_TOKEN")),
        );
}

#[test]
fn test_json_mode_reports_fault_on_stdout() {
    atlas()
        .args(["--json", "project", "list"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with("{\"error\":"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_invalid_issue_key_fails_before_credential_resolution() {
    // No credentials in the environment, so reaching the resolver would
    // report MissingConfiguration instead.
    atlas()
        .args(["issue", "get", "not-a-key"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn test_missing_subcommand_prints_help_with_fault_exit_code() {
    atlas()
        .args(["issue"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_command_is_invalid_arguments() {
    atlas()
        .args(["frobnicate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn test_parse_error_respects_json_flag() {
    atlas()
        .args(["--json", "issue"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with("{\"error\":"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_page_create_requires_a_body_source() {
    atlas()
        .args(["page", "create", "--space", "DOCS", "--title", "Runbook"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--body or --body-file"));
}

#[test]
fn test_page_create_rejects_both_body_sources() {
    atlas()
        .args([
            "page",
            "create",
            "--space",
            "DOCS",
            "--title",
            "Runbook",
            "--body",
            "<p>x</p>",
            "--body-file",
            "body.html",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn test_attach_rejects_missing_file_without_network() {
    // Credentials point at a closed port; the local file check must fail
    // before any connection is attempted.
    atlas_with_env()
        .args(["issue", "attach", "PROJ-1", "/definitely/not/here.png"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_help_exits_zero() {
    atlas()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("issue")
                .and(predicate::str::contains("page"))
                .and(predicate::str::contains("space")),
        );
}

#[test]
fn test_version_flag_exits_zero() {
    atlas()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("atlas"));
}

#[test]
fn test_completion_bash_prints_script() {
    atlas()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("atlas"));
}
