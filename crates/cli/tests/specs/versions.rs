// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `specdoc versions`

use crate::prelude::*;

#[test]
fn lists_known_versions() {
    let project = Project::empty();
    project.specdoc().args(&["versions"]).passes().stdout_eq(
        "1.0 (baseline)\n\
         2.0 (latest): Track progress and approvals on implementation steps; add work_logs\n",
    );
}

#[test]
fn json_output() {
    let project = Project::empty();
    let json = project
        .specdoc()
        .args(&["versions", "-o", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json[0]["version"], "1.0");
    assert_eq!(json[0]["baseline"], true);
    assert_eq!(json[1]["version"], "2.0");
    assert_eq!(json[1]["latest"], true);
}
