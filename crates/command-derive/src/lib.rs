// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # command-derive
//!
//! One crate, all features. Re-exports:
//! - [`FieldMap`](macro@FieldMap) and [`Entity`](macro@Entity) derive macros
//!   from `command-derive-impl`
//! - All types from `command-core` ([`Command`], [`CommandHolder`],
//!   [`CreateCommand`], [`EntityMapper`], [`Repository`], ...)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use command_derive::prelude::*;
//! use command_derive::{Entity, FieldMap};
//!
//! #[derive(Debug, Clone, Default, Entity)]
//! pub struct Project {
//!     #[id]
//!     pub id:   Option<u64>,
//!     pub name: String
//! }
//!
//! #[derive(FieldMap)]
//! #[field_map(into = "Project")]
//! pub struct ProjectCreateInput {
//!     pub name: Option<String>
//! }
//!
//! let repository = Arc::new(InMemoryRepository::<Project>::new(counter()));
//! let create = CreateCommand::auto_mapped("createProject", repository)
//!     .rules(RuleSet::new().constraint(
//!         "name",
//!         |input: &ProjectCreateInput| input.name.as_deref(),
//!         |check| check.not_blank().max_chars(255)
//!     ));
//!
//! let id = create.execute_input(ProjectCreateInput { name: Some("Tools".into()) })?;
//! ```

pub use command_core::*;
pub use command_derive_impl::{Entity, FieldMap};
