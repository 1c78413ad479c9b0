//
//  atlas-cli
//  tests/service.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! End-to-end checks of the binary against a local mock service: report
//! shapes, rendered rows and exit codes for operations that reach the wire.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

/// Builds a command pointing at the given mock server.
fn atlas(server: &mockito::ServerGuard) -> Command {
    let mut cmd = Command::cargo_bin("atlas").unwrap();
    cmd.env_clear()
        .env("ATLAS_BASE_URL", server.url())
        .env("ATLAS_EMAIL", "dev@example.com")
        .env("ATLAS_API_TOKEN", "tok-123");
    cmd
}

#[test]
fn test_bulk_label_partial_failure_reports_every_key_in_json() {
    let mut server = mockito::Server::new();
    let updated = server
        .mock("PUT", "/rest/api/2/issue/ENG-1")
        .with_status(204)
        .expect(1)
        .create();
    let missing = server
        .mock("PUT", "/rest/api/2/issue/ENG-2")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({"errorMessages": ["Issue Does Not Exist"]}).to_string())
        .expect(1)
        .create();

    // The per-key report stays on stdout ahead of the fault document, so
    // both successful and failed keys remain visible to JSON consumers.
    atlas(&server)
        .args(["--json", "issue", "label", "ENG-1", "ENG-2", "--add", "triage"])
        .assert()
        .failure()
        .code(1)
        .stdout(
            predicate::str::contains("\"updated\": true")
                .and(predicate::str::contains("\"updated\": false"))
                .and(predicate::str::contains("Issue Does Not Exist"))
                .and(predicate::str::contains("label update failed for ENG-2")),
        )
        .stderr(predicate::str::is_empty());

    updated.assert();
    missing.assert();
}

#[test]
fn test_project_types_renders_rows_in_text() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rest/api/2/project/ENG")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "key": "ENG",
                "name": "Engineering",
                "issueTypes": [
                    {"id": "1", "name": "Bug", "subtask": false, "description": "A problem"},
                    {"id": "5", "name": "Sub-task", "subtask": true}
                ]
            })
            .to_string(),
        )
        .create();

    atlas(&server)
        .args(["project", "types", "ENG"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Bug")
                .and(predicate::str::contains("A problem"))
                .and(predicate::str::contains("Sub-task"))
                .and(predicate::str::contains("yes")),
        );
}
