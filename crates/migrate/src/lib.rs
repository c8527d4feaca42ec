// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Versioned schema migrations for specification documents.
//!
//! A document is an untyped [`serde_json::Value`] tree whose
//! `metadata.schema_version` names the schema it conforms to. Migrations
//! move a document between schema versions one registered step at a time:
//!
//! ```text
//! declared version ──► MigrationRegistry::units_between ──► MigrationPlan
//!                                                              │
//!            Migrator::migrate: upgrade/downgrade each step ◄──┘
//!                     │ stamp metadata.schema_version after each step
//!                     ▼
//!        Migrated { document, manifest } | MigrationFailure { document, failed_at, .. }
//! ```
//!
//! The registry is built once and is read-only afterwards; the runner is
//! synchronous and never touches the filesystem.

pub mod builtin;
pub mod document;

mod config;
mod error;
mod registry;
mod runner;
mod unit;
mod version;


pub use config::{MigrationConfig, UnversionedPolicy};
pub use document::Malformed;
pub use error::MigrationError;
pub use registry::{MigrationPlan, MigrationRegistry, PlanStep};
pub use runner::{migrate, FailedStep, Manifest, Migrated, MigrationFailure, Migrator};
pub use unit::{Migration, MigrationUnit, TransformFn};
pub use version::{Direction, SchemaVersion};
