// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `specdoc status`

use crate::prelude::*;

#[test]
fn reports_pending_work_per_document() {
    let project = Project::empty();
    project.file("old.json", SPEC_V1);
    project.file("new.json", SPEC_V2);
    project.file("bare.yaml", "title: Bare\n");

    project
        .specdoc()
        .args(&["status", "old.json", "new.json", "bare.yaml"])
        .passes()
        .stdout_eq(
            "old.json: 1.0 (upgrade to 2.0)\n\
             new.json: 2.0 (up to date)\n\
             bare.yaml: 1.0 (upgrade to 2.0)\n",
        );

    similar_asserts::assert_eq!(project.read("old.json"), SPEC_V1);
}

#[test]
fn downgrade_target() {
    let project = Project::empty();
    project.file("new.json", SPEC_V2);
    project
        .specdoc()
        .args(&["status", "new.json", "--to", "1.0"])
        .passes()
        .stdout_eq("new.json: 2.0 (downgrade to 1.0)\n");
}

#[test]
fn bad_documents_fail_but_others_are_reported() {
    let project = Project::empty();
    project.file("good.json", SPEC_V1);
    project.file("future.json", r#"{"metadata": {"schema_version": "9.0"}}"#);

    project
        .specdoc()
        .args(&["status", "future.json", "missing.json", "good.json"])
        .fails()
        .code(1)
        .stdout_eq("good.json: 1.0 (upgrade to 2.0)\n")
        .stderr_has("error: future.json: unknown schema version 9.0")
        .stderr_has("error: missing.json: failed to load missing.json")
        .stderr_has("Error: 2 of 3 documents could not be inspected");
}

#[test]
fn json_output() {
    let project = Project::empty();
    project.file("old.json", SPEC_V1);
    let json = project
        .specdoc()
        .args(&["status", "old.json", "-o", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json[0]["file"], "old.json");
    assert_eq!(json[0]["version"], "1.0");
    assert_eq!(json[0]["direction"], "upgrade");
    assert_eq!(json[0]["pending"][0], "2.0");
}
