// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ready-made create, update and delete commands.
//!
//! Each command runs inside the shared [`pipeline`](crate::pipeline) and
//! exposes named hooks around its fixed core sequence.
//!
//! | Command           | Core sequence                                                          | Output  |
//! |-------------------|------------------------------------------------------------------------|---------|
//! | [`CreateCommand`] | before_create, build, before_save, save, after_save, extract id        | `E::Id` |
//! | [`UpdateCommand`] | extract id, load, before_update, apply, before_save, save, after_save  | `E`     |
//! | [`DeleteCommand`] | load, before_delete, remove, after_delete                              | `()`    |
//!
//! Hooks receive the execution [`Context`] and may fail with a
//! [`CommandError`] to abort the command. Every hook defaults to a no-op.

mod create;
mod delete;
#[cfg(test)]
mod fixtures;
mod update;

pub use create::CreateCommand;
pub use delete::{DeleteCommand, LoadPolicy};
pub use update::UpdateCommand;

use crate::{context::Context, error::CommandError, repository::Entity};

/// Hook that may adjust the input in place before the entity is touched.
type InputHook<In> = Box<dyn Fn(&mut In, &mut Context) -> Result<(), CommandError> + Send + Sync>;

/// Hook that may rewrite the entity right before `save`.
type EntityHook<E, In> =
    Box<dyn Fn(E, &In, &mut Context) -> Result<E, CommandError> + Send + Sync>;

/// Hook observing the stored entity after `save`.
type SavedHook<E, In> =
    Box<dyn Fn(&E, &In, &mut Context) -> Result<(), CommandError> + Send + Sync>;

/// Builds the error for a missing entity.
type NotFoundFn<E> = Box<dyn Fn(&<E as Entity>::Id) -> CommandError + Send + Sync>;

fn missing<E: Entity>(custom: Option<&NotFoundFn<E>>, id: &E::Id) -> CommandError {
    match custom {
        Some(build) => build(id),
        None => CommandError::not_found(E::NAME, id)
    }
}
