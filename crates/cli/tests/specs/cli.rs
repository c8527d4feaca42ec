// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation and usage errors

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    let project = Project::empty();
    project
        .specdoc()
        .passes()
        .stdout_has("Usage: specdoc")
        .stdout_has("migrate")
        .stdout_has("status")
        .stdout_has("versions");
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let project = Project::empty();
    project
        .specdoc()
        .args(&["convert"])
        .fails()
        .code(2)
        .stderr_has("unrecognized subcommand 'convert'");
}

#[test]
fn migrate_without_files_is_usage_error() {
    let project = Project::empty();
    project
        .specdoc()
        .args(&["migrate"])
        .fails()
        .code(2)
        .stderr_has("<FILE>...");
}

#[test]
fn unknown_target_is_usage_error() {
    let project = Project::empty();
    project.file("spec.json", SPEC_V1);
    project
        .specdoc()
        .args(&["migrate", "spec.json", "--to", "99.0"])
        .fails()
        .code(2)
        .stderr_eq("Error: unknown schema version 99.0 (known: 1.0, 2.0)\n");
    similar_asserts::assert_eq!(project.read("spec.json"), SPEC_V1);
}

#[test]
fn malformed_target_is_usage_error() {
    let project = Project::empty();
    project.file("spec.json", SPEC_V1);
    project
        .specdoc()
        .args(&["status", "spec.json", "--to", "two"])
        .fails()
        .code(2)
        .stderr_has("invalid version format \"two\"");
}
