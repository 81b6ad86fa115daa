// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for command-derive.
//!
//! This crate provides the runtime used by command-derive generated code:
//! the command contract, its execution pipeline, field mapping and the
//! ready-made CRUD commands. It can also be used standalone with manual
//! [`FieldMap`] and [`Entity`] implementations.
//!
//! # Overview
//!
//! - [`Command`] — Named operation with typed input and output
//! - [`CommandHolder`] / [`Context`] — Per-invocation envelope and attributes
//! - [`Lifecycle`] / [`run_command`] — Validate, before, core, success, error
//! - [`RuleSet`] — Declarative input validation
//! - [`EntityMapper`] / [`FieldMap`] — Name-based field copying
//! - [`CreateCommand`] / [`UpdateCommand`] / [`DeleteCommand`] — CRUD
//! - [`Repository`] / [`Entity`] — Persistence seam
//! - [`Transaction`] — Caller-owned transactions
//! - [`prelude`] — Convenient re-exports
//!
//! # Features
//!
//! | Feature    | Default | Enables                                           |
//! |------------|---------|---------------------------------------------------|
//! | `validate` | yes     | `validator::Validate` bridge for rule sets        |
//! | `memory`   | yes     | [`InMemoryRepository`](memory::InMemoryRepository) |
//!
//! # Usage
//!
//! Most users should use `command-derive` directly, which re-exports this
//! crate.
//!
//! ```rust,ignore
//! use command_core::prelude::*;
//!
//! let create = CreateCommand::<Project, CreateProject, _>::auto_mapped("ProjectCreate", repo)
//!     .rules(project_rules());
//! let id = create.execute_input(input)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod command;
pub mod context;
pub mod crud;
pub mod error;
pub mod holder;
pub mod mapper;
#[cfg(feature = "memory")]
#[cfg_attr(docsrs, doc(cfg(feature = "memory")))]
pub mod memory;
pub mod pipeline;
pub mod prelude;
pub mod repository;
pub mod transaction;
pub mod validation;

pub use command::{Command, FnCommand, TransactionalCommand};
pub use context::{Context, VIOLATIONS_KEY};
pub use crud::{CreateCommand, DeleteCommand, LoadPolicy, UpdateCommand};
pub use error::{BoxError, CommandError, ValidationError};
pub use holder::CommandHolder;
pub use mapper::{CopyOutcome, EntityMapper, FieldCopy, FieldMap, FieldSet, MapReport};
#[cfg(feature = "memory")]
pub use memory::{InMemoryRepository, MemoryError};
pub use pipeline::{Lifecycle, run_command};
pub use repository::{Entity, Repository};
pub use transaction::{Transaction, TransactionError, TransactionHandle, TransactionManager};
pub use validation::{RuleSet, StrConstraints, Violation, Violations};
