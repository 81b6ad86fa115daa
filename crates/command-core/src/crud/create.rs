// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Create command.

use std::{fmt, mem, sync::Arc};

use tracing::debug;

use super::{EntityHook, InputHook, SavedHook};
use crate::{
    command::{Command, TransactionalCommand},
    context::Context,
    error::CommandError,
    holder::CommandHolder,
    mapper::{EntityMapper, FieldMap, FieldSet},
    pipeline::{Lifecycle, run_command},
    repository::{Entity, Repository},
    validation::RuleSet
};

type BuildFn<E, In> =
    Box<dyn Fn(&In, &FieldSet, &mut Context) -> Result<E, CommandError> + Send + Sync>;

fn map_into<E, In>(input: &In, excluded: &FieldSet, _: &mut Context) -> Result<E, CommandError>
where
    E: Default,
    In: FieldMap<E>
{
    Ok(EntityMapper::new().map_new(input, excluded))
}

/// Builds a new entity from the input, saves it and returns its identifier.
///
/// Absent input fails with [`CommandError::MissingInput`].
pub struct CreateCommand<E: Entity, In, R> {
    name:          String,
    repository:    Arc<R>,
    lifecycle:     Lifecycle<In, E::Id>,
    excluded:      FieldSet,
    build:         BuildFn<E, In>,
    before_create: Option<InputHook<In>>,
    before_save:   Option<EntityHook<E, In>>,
    after_save:    Option<SavedHook<E, In>>
}

impl<E, In, R> CreateCommand<E, In, R>
where
    E: Entity + Default,
    In: FieldMap<E> + 'static,
    R: Repository<E>
{
    /// Build entities with [`EntityMapper`] onto `E::default()`.
    ///
    /// Audit fields listed in [`FieldSet::create_defaults`] are never copied.
    pub fn auto_mapped(name: impl Into<String>, repository: Arc<R>) -> Self {
        Self::from_parts(name.into(), repository, Box::new(map_into::<E, In>))
    }
}

impl<E, In, R> CreateCommand<E, In, R>
where
    E: Entity,
    R: Repository<E>
{
    /// Build entities with `build`.
    ///
    /// Exclusions do not apply to custom builders.
    pub fn with_builder<F>(name: impl Into<String>, repository: Arc<R>, build: F) -> Self
    where
        F: Fn(&In, &mut Context) -> Result<E, CommandError> + Send + Sync + 'static
    {
        Self::from_parts(
            name.into(),
            repository,
            Box::new(move |input: &In, _: &FieldSet, ctx: &mut Context| build(input, ctx))
        )
    }

    fn from_parts(name: String, repository: Arc<R>, build: BuildFn<E, In>) -> Self {
        Self {
            name,
            repository,
            lifecycle: Lifecycle::new(),
            excluded: FieldSet::create_defaults(),
            build,
            before_create: None,
            before_save: None,
            after_save: None
        }
    }

    /// Validate input against `rules`.
    #[must_use]
    pub fn rules(mut self, rules: RuleSet<In>) -> Self {
        self.lifecycle = mem::take(&mut self.lifecycle).rules(rules);
        self
    }

    /// Build the rule set per invocation.
    #[must_use]
    pub fn rules_with<F>(mut self, build: F) -> Self
    where
        F: Fn(&CommandHolder<In>) -> Option<RuleSet<In>> + Send + Sync + 'static
    {
        self.lifecycle = mem::take(&mut self.lifecycle).rules_with(build);
        self
    }

    /// Replace the pipeline hooks, including validation.
    #[must_use]
    pub fn lifecycle(mut self, lifecycle: Lifecycle<In, E::Id>) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Replace the mapping exclusions.
    #[must_use]
    pub fn excluding(mut self, excluded: FieldSet) -> Self {
        self.excluded = excluded;
        self
    }

    /// Add one name to the mapping exclusions.
    #[must_use]
    pub fn exclude(mut self, name: &'static str) -> Self {
        self.excluded.insert(name);
        self
    }

    /// Adjust the input before the entity is built.
    #[must_use]
    pub fn before_create<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut In, &mut Context) -> Result<(), CommandError> + Send + Sync + 'static
    {
        self.before_create = Some(Box::new(hook));
        self
    }

    /// Rewrite the built entity before it is saved.
    #[must_use]
    pub fn before_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(E, &In, &mut Context) -> Result<E, CommandError> + Send + Sync + 'static
    {
        self.before_save = Some(Box::new(hook));
        self
    }

    /// Observe the saved entity.
    #[must_use]
    pub fn after_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&E, &In, &mut Context) -> Result<(), CommandError> + Send + Sync + 'static
    {
        self.after_save = Some(Box::new(hook));
        self
    }

    /// Current mapping exclusions.
    pub const fn excluded(&self) -> &FieldSet {
        &self.excluded
    }

    /// Backing repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn create(&self, holder: &mut CommandHolder<In>) -> Result<E::Id, CommandError> {
        let (input, ctx) = holder.parts_mut();
        let input = input.ok_or(CommandError::MissingInput("Input"))?;

        if let Some(hook) = &self.before_create {
            hook(input, ctx)?;
        }
        let input = &*input;
        let entity = (self.build)(input, &self.excluded, ctx)?;
        let entity = match &self.before_save {
            Some(hook) => hook(entity, input, ctx)?,
            None => entity
        };

        let saved = self
            .repository
            .save(entity)
            .map_err(CommandError::repository)?;
        if let Some(hook) = &self.after_save {
            hook(&saved, input, ctx)?;
        }

        let id = saved
            .id()
            .cloned()
            .ok_or_else(|| CommandError::construction(E::NAME, "saved entity has no identifier"))?;
        debug!(entity = E::NAME, id = %id, "entity created");
        Ok(id)
    }
}

impl<E: Entity, In, R> fmt::Debug for CreateCommand<E, In, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateCommand")
            .field("name", &self.name)
            .field("entity", &E::NAME)
            .field("excluded", &self.excluded)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

impl<E, In, R> Command for CreateCommand<E, In, R>
where
    E: Entity,
    R: Repository<E>
{
    type Input = In;
    type Output = E::Id;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, holder: CommandHolder<In>) -> Result<E::Id, CommandError> {
        run_command(&self.name, &self.lifecycle, holder, |holder| {
            self.create(holder)
        })
    }
}

impl<E, In, R> TransactionalCommand for CreateCommand<E, In, R>
where
    E: Entity,
    R: Repository<E>
{
}
