// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file and environment

use crate::prelude::*;

const UNVERSIONED: &str = "{\"title\": \"Bare\"}\n";

#[test]
fn unversioned_documents_assume_baseline_by_default() {
    let project = Project::empty();
    project.file("bare.json", UNVERSIONED);
    project
        .specdoc()
        .args(&["migrate", "bare.json"])
        .passes()
        .stdout_eq("bare.json: 1.0 -> 2.0 (2.0)\n");
    assert_eq!(project.read_json("bare.json")["metadata"]["schema_version"], "2.0");
}

#[test]
fn local_config_can_reject_unversioned_documents() {
    let project = Project::empty();
    project.file("specdoc.toml", "unversioned = \"reject\"\n");
    project.file("bare.json", UNVERSIONED);

    project
        .specdoc()
        .args(&["migrate", "bare.json"])
        .fails()
        .code(1)
        .stderr_has("error: bare.json: document does not declare metadata.schema_version");
    assert_eq!(project.read("bare.json"), UNVERSIONED);
}

#[test]
fn local_config_can_disable_backups() {
    let project = Project::empty();
    project.file("specdoc.toml", "backup = false\n");
    project.file("spec.json", SPEC_V1);

    project.specdoc().args(&["migrate", "spec.json"]).passes();
    assert!(!project.exists("spec.json.bak"));
}

#[test]
fn env_config_beats_local_file() {
    let project = Project::empty();
    project.file("specdoc.toml", "unversioned = \"reject\"\n");
    project.file("other.toml", "unversioned = \"assume-baseline\"\n");
    project.file("bare.json", UNVERSIONED);

    project
        .specdoc()
        .env("SPECDOC_CONFIG", project.path().join("other.toml"))
        .args(&["migrate", "bare.json"])
        .passes();
}

#[test]
fn flag_beats_env_config() {
    let project = Project::empty();
    project.file("reject.toml", "unversioned = \"reject\"\n");
    project.file("bare.json", UNVERSIONED);

    project
        .specdoc()
        .env("SPECDOC_CONFIG", project.path().join("missing.toml"))
        .args(&["status", "bare.json", "--config", "reject.toml"])
        .fails()
        .code(1)
        .stderr_has("document does not declare metadata.schema_version");
}

#[test]
fn user_config_dir_is_used_last() {
    let project = Project::empty();
    let user_config = project.home().join(".config/specdoc/config.toml");
    std::fs::create_dir_all(user_config.parent().unwrap()).unwrap();
    std::fs::write(&user_config, "backup = false\n").unwrap();
    project.file("spec.json", SPEC_V1);

    project.specdoc().args(&["migrate", "spec.json"]).passes();
    if cfg!(target_os = "linux") {
        assert!(!project.exists("spec.json.bak"));
    }
}

#[test]
fn invalid_config_is_usage_error() {
    let project = Project::empty();
    project.file("specdoc.toml", "backup = \"sometimes\"\n");
    project.file("spec.json", SPEC_V1);

    project
        .specdoc()
        .args(&["migrate", "spec.json"])
        .fails()
        .code(2)
        .stderr_has("invalid config");
    similar_asserts::assert_eq!(project.read("spec.json"), SPEC_V1);
}

#[test]
fn missing_explicit_config_is_usage_error() {
    let project = Project::empty();
    project
        .specdoc()
        .args(&["versions", "--config", "nope.toml"])
        .fails()
        .code(2)
        .stderr_has("failed to read config nope.toml");
}

#[test]
fn log_filter_enables_debug_output() {
    let project = Project::empty();
    project.file("spec.json", SPEC_V1);

    project
        .specdoc()
        .env("SPECDOC_LOG", "debug")
        .args(&["migrate", "spec.json", "--dry-run"])
        .passes()
        .stderr_has("applied migration step");
}

#[test]
fn default_log_level_is_quiet_on_success() {
    let project = Project::empty();
    project.file("spec.json", SPEC_V1);

    project
        .specdoc()
        .args(&["migrate", "spec.json"])
        .passes()
        .stderr_eq("");
}
