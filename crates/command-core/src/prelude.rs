// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use command_core::prelude::*;
//! ```

#[cfg(feature = "memory")]
pub use crate::memory::InMemoryRepository;
pub use crate::{
    Command, CommandError, CommandHolder, Context, CreateCommand, DeleteCommand, Entity,
    EntityMapper, FieldMap, FieldSet, FnCommand, Lifecycle, LoadPolicy, Repository, RuleSet,
    Transaction, TransactionManager, TransactionalCommand, UpdateCommand, ValidationError,
    Violation, Violations
};
