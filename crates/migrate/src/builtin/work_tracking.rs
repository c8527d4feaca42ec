// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! 2.0: progress and approval tracking on implementation steps, plus a
//! document-level work log.
//!
//! Upgrade adds `progress` and `approvals` (null) to every element of
//! `implementation` and `work_logs` (null) at the root, each only when the
//! key is missing. Downgrade removes the same three keys. Values recorded
//! under 2.0 are dropped on the way down.

use crate::document::{self, Malformed};
use crate::{MigrationError, MigrationUnit};
use serde_json::{Map, Value};

pub const VERSION: &str = "2.0";

const IMPLEMENTATION: &str = "implementation";
const PROGRESS: &str = "progress";
const APPROVALS: &str = "approvals";
const WORK_LOGS: &str = "work_logs";

const STEP_FIELDS: [&str; 2] = [PROGRESS, APPROVALS];

pub fn unit() -> Result<MigrationUnit, MigrationError> {
    Ok(MigrationUnit::new(
        VERSION,
        "Track progress and approvals on implementation steps; add work_logs",
        upgrade,
        downgrade,
    )?
    .owning(&[
        "implementation[].progress",
        "implementation[].approvals",
        "work_logs",
    ]))
}

fn upgrade(doc: &mut Value) -> Result<(), Malformed> {
    let root = document::root_map_mut(doc)?;
    for step in implementation_steps(root)? {
        for field in STEP_FIELDS {
            document::ensure_field(step, field, Value::Null);
        }
    }
    document::ensure_field(root, WORK_LOGS, Value::Null);
    Ok(())
}

fn downgrade(doc: &mut Value) -> Result<(), Malformed> {
    let root = document::root_map_mut(doc)?;
    for step in implementation_steps(root)? {
        for field in STEP_FIELDS {
            document::remove_field(step, field);
        }
    }
    document::remove_field(root, WORK_LOGS);
    Ok(())
}

/// Every implementation step, validated as maps up front so a bad element
/// fails the unit before anything is changed.
fn implementation_steps(
    root: &mut Map<String, Value>,
) -> Result<Vec<&mut Map<String, Value>>, Malformed> {
    match document::sequence_mut(root, IMPLEMENTATION)? {
        Some(steps) => document::maps_mut(steps, IMPLEMENTATION),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
#[path = "work_tracking_tests.rs"]
mod tests;
