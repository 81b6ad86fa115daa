// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Delete command.

use std::{fmt, mem, sync::Arc};

use tracing::{debug, trace};

use super::{NotFoundFn, missing};
use crate::{
    command::{Command, TransactionalCommand},
    context::Context,
    error::CommandError,
    holder::CommandHolder,
    pipeline::{Lifecycle, run_command},
    repository::{Entity, Repository},
    validation::RuleSet
};

/// How the delete command loads the entity before removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Load the entity; fail with `NotFound` when it does not exist.
    #[default]
    Required,
    /// Load the entity; continue with `None` when it does not exist.
    Optional,
    /// Never load; hooks receive `None`.
    Skip
}

type DeleteHook<E> = Box<
    dyn Fn(&<E as Entity>::Id, Option<&E>, &mut Context) -> Result<(), CommandError> + Send + Sync
>;

type CustomRemoval<E, R> = Box<
    dyn Fn(&<E as Entity>::Id, Option<&E>, &R, &mut Context) -> Result<(), CommandError>
        + Send
        + Sync
>;

enum Removal<E: Entity, R> {
    Hard,
    Soft(Box<dyn Fn(&mut E) + Send + Sync>),
    Custom(CustomRemoval<E, R>)
}

/// Removes the entity with the given identifier.
///
/// Removal is a hard `delete_by_id` unless [`DeleteCommand::soft_delete`] or
/// [`DeleteCommand::perform_delete`] replaces it.
pub struct DeleteCommand<E: Entity, R> {
    name:          String,
    repository:    Arc<R>,
    lifecycle:     Lifecycle<E::Id, ()>,
    load:          LoadPolicy,
    removal:       Removal<E, R>,
    before_delete: Option<DeleteHook<E>>,
    after_delete:  Option<DeleteHook<E>>,
    not_found:     Option<NotFoundFn<E>>
}

impl<E, R> DeleteCommand<E, R>
where
    E: Entity,
    R: Repository<E>
{
    /// Hard-delete command with [`LoadPolicy::Required`].
    pub fn new(name: impl Into<String>, repository: Arc<R>) -> Self {
        Self {
            name: name.into(),
            repository,
            lifecycle: Lifecycle::new(),
            load: LoadPolicy::Required,
            removal: Removal::Hard,
            before_delete: None,
            after_delete: None,
            not_found: None
        }
    }

    /// Validate the identifier against `rules`.
    #[must_use]
    pub fn rules(mut self, rules: RuleSet<E::Id>) -> Self {
        self.lifecycle = mem::take(&mut self.lifecycle).rules(rules);
        self
    }

    /// Replace the pipeline hooks, including validation.
    #[must_use]
    pub fn lifecycle(mut self, lifecycle: Lifecycle<E::Id, ()>) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Change how the entity is loaded before removal.
    #[must_use]
    pub fn load_policy(mut self, load: LoadPolicy) -> Self {
        self.load = load;
        self
    }

    /// Mark the entity with `mark` and save it instead of deleting it.
    ///
    /// The entity is loaded even under [`LoadPolicy::Skip`]; a missing
    /// entity fails with `NotFound`.
    #[must_use]
    pub fn soft_delete<F>(mut self, mark: F) -> Self
    where
        F: Fn(&mut E) + Send + Sync + 'static
    {
        self.removal = Removal::Soft(Box::new(mark));
        self
    }

    /// Replace removal with `perform`.
    #[must_use]
    pub fn perform_delete<F>(mut self, perform: F) -> Self
    where
        F: Fn(&E::Id, Option<&E>, &R, &mut Context) -> Result<(), CommandError>
            + Send
            + Sync
            + 'static
    {
        self.removal = Removal::Custom(Box::new(perform));
        self
    }

    /// Run before removal; an error cancels the delete.
    #[must_use]
    pub fn before_delete<F>(mut self, hook: F) -> Self
    where
        F: Fn(&E::Id, Option<&E>, &mut Context) -> Result<(), CommandError> + Send + Sync + 'static
    {
        self.before_delete = Some(Box::new(hook));
        self
    }

    /// Run after removal.
    #[must_use]
    pub fn after_delete<F>(mut self, hook: F) -> Self
    where
        F: Fn(&E::Id, Option<&E>, &mut Context) -> Result<(), CommandError> + Send + Sync + 'static
    {
        self.after_delete = Some(Box::new(hook));
        self
    }

    /// Error to raise when no entity exists for the identifier.
    #[must_use]
    pub fn not_found<F>(mut self, build: F) -> Self
    where
        F: Fn(&E::Id) -> CommandError + Send + Sync + 'static
    {
        self.not_found = Some(Box::new(build));
        self
    }

    /// Backing repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn find(&self, id: &E::Id) -> Result<Option<E>, CommandError> {
        self.repository
            .find_by_id(id)
            .map_err(CommandError::repository)
    }

    fn require(&self, id: &E::Id) -> Result<E, CommandError> {
        self.find(id)?
            .ok_or_else(|| missing::<E>(self.not_found.as_ref(), id))
    }

    fn load(&self, id: &E::Id) -> Result<Option<E>, CommandError> {
        match self.load {
            LoadPolicy::Required => self.require(id).map(Some),
            LoadPolicy::Optional => {
                let found = self.find(id)?;
                if found.is_none() {
                    trace!(entity = E::NAME, id = %id, "entity absent, continuing delete");
                }
                Ok(found)
            }
            LoadPolicy::Skip => {
                trace!(entity = E::NAME, id = %id, "load skipped");
                Ok(None)
            }
        }
    }

    fn remove(&self, id: &E::Id, entity: Option<&E>, ctx: &mut Context) -> Result<(), CommandError> {
        match &self.removal {
            Removal::Hard => self
                .repository
                .delete_by_id(id)
                .map_err(CommandError::repository),
            Removal::Soft(mark) => {
                let mut entity = match entity {
                    Some(entity) => entity.clone(),
                    None => self.require(id)?
                };
                mark(&mut entity);
                self.repository
                    .save(entity)
                    .map(drop)
                    .map_err(CommandError::repository)
            }
            Removal::Custom(perform) => perform(id, entity, self.repository.as_ref(), ctx)
        }
    }

    fn delete(&self, holder: &mut CommandHolder<E::Id>) -> Result<(), CommandError> {
        let id = holder
            .input()
            .cloned()
            .ok_or(CommandError::MissingInput("ID"))?;
        let ctx = holder.context_mut();

        let entity = self.load(&id)?;
        if let Some(hook) = &self.before_delete {
            hook(&id, entity.as_ref(), ctx)?;
        }
        self.remove(&id, entity.as_ref(), ctx)?;
        if let Some(hook) = &self.after_delete {
            hook(&id, entity.as_ref(), ctx)?;
        }
        debug!(entity = E::NAME, id = %id, "entity deleted");
        Ok(())
    }
}

impl<E: Entity, R> fmt::Debug for DeleteCommand<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let removal = match self.removal {
            Removal::Hard => "hard",
            Removal::Soft(_) => "soft",
            Removal::Custom(_) => "custom"
        };
        f.debug_struct("DeleteCommand")
            .field("name", &self.name)
            .field("entity", &E::NAME)
            .field("load", &self.load)
            .field("removal", &removal)
            .finish_non_exhaustive()
    }
}

impl<E, R> Command for DeleteCommand<E, R>
where
    E: Entity,
    R: Repository<E>
{
    type Input = E::Id;
    type Output = ();

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, holder: CommandHolder<E::Id>) -> Result<(), CommandError> {
        run_command(&self.name, &self.lifecycle, holder, |holder| {
            self.delete(holder)
        })
    }
}

impl<E, R> TransactionalCommand for DeleteCommand<E, R>
where
    E: Entity,
    R: Repository<E>
{
}
