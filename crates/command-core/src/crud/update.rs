// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Update command.

use std::{fmt, mem, sync::Arc};

use tracing::debug;

use super::{EntityHook, NotFoundFn, SavedHook, missing};
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

type ExtractIdFn<E, In> = Box<dyn Fn(&In) -> Option<<E as Entity>::Id> + Send + Sync>;

type ApplyFn<E, In> =
    Box<dyn Fn(E, &In, &FieldSet, &mut Context) -> Result<E, CommandError> + Send + Sync>;

type UpdateHook<E, In> =
    Box<dyn Fn(&mut In, &E, &mut Context) -> Result<(), CommandError> + Send + Sync>;

fn map_onto<E, In>(
    mut entity: E,
    input: &In,
    excluded: &FieldSet,
    _: &mut Context
) -> Result<E, CommandError>
where
    In: FieldMap<E>
{
    EntityMapper::new().map(input, &mut entity, excluded);
    Ok(entity)
}

/// Loads an entity by the input's identifier, applies the input and saves it.
///
/// An absent identifier fails with [`CommandError::MissingInput`] before the
/// repository is touched. A missing entity fails with
/// [`CommandError::NotFound`] unless [`UpdateCommand::not_found`] says
/// otherwise.
pub struct UpdateCommand<E: Entity, In, R> {
    name:          String,
    repository:    Arc<R>,
    lifecycle:     Lifecycle<In, E>,
    excluded:      FieldSet,
    extract_id:    ExtractIdFn<E, In>,
    apply:         ApplyFn<E, In>,
    before_update: Option<UpdateHook<E, In>>,
    before_save:   Option<EntityHook<E, In>>,
    after_save:    Option<SavedHook<E, In>>,
    not_found:     Option<NotFoundFn<E>>
}

impl<E, In, R> UpdateCommand<E, In, R>
where
    E: Entity,
    In: FieldMap<E> + 'static,
    R: Repository<E>
{
    /// Apply input onto the loaded entity with [`EntityMapper`].
    ///
    /// Absent input values leave the entity untouched. Names listed in
    /// [`FieldSet::update_defaults`] are never copied.
    pub fn auto_mapped<X>(name: impl Into<String>, repository: Arc<R>, extract_id: X) -> Self
    where
        X: Fn(&In) -> Option<E::Id> + Send + Sync + 'static
    {
        Self::from_parts(
            name.into(),
            repository,
            Box::new(extract_id),
            Box::new(map_onto::<E, In>)
        )
    }
}

impl<E, In, R> UpdateCommand<E, In, R>
where
    E: Entity,
    R: Repository<E>
{
    /// Apply input with `apply`.
    ///
    /// Exclusions do not apply to custom appliers.
    pub fn with_apply<X, A>(
        name: impl Into<String>,
        repository: Arc<R>,
        extract_id: X,
        apply: A
    ) -> Self
    where
        X: Fn(&In) -> Option<E::Id> + Send + Sync + 'static,
        A: Fn(E, &In, &mut Context) -> Result<E, CommandError> + Send + Sync + 'static
    {
        Self::from_parts(
            name.into(),
            repository,
            Box::new(extract_id),
            Box::new(move |entity: E, input: &In, _: &FieldSet, ctx: &mut Context| {
                apply(entity, input, ctx)
            })
        )
    }

    fn from_parts(
        name: String,
        repository: Arc<R>,
        extract_id: ExtractIdFn<E, In>,
        apply: ApplyFn<E, In>
    ) -> Self {
        Self {
            name,
            repository,
            lifecycle: Lifecycle::new(),
            excluded: FieldSet::update_defaults(),
            extract_id,
            apply,
            before_update: None,
            before_save: None,
            after_save: None,
            not_found: None
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
    pub fn lifecycle(mut self, lifecycle: Lifecycle<In, E>) -> Self {
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

    /// Adjust the input once the current entity is known.
    #[must_use]
    pub fn before_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut In, &E, &mut Context) -> Result<(), CommandError> + Send + Sync + 'static
    {
        self.before_update = Some(Box::new(hook));
        self
    }

    /// Rewrite the updated entity before it is saved.
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

    /// Error to raise when no entity exists for the identifier.
    #[must_use]
    pub fn not_found<F>(mut self, build: F) -> Self
    where
        F: Fn(&E::Id) -> CommandError + Send + Sync + 'static
    {
        self.not_found = Some(Box::new(build));
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

    fn update(&self, holder: &mut CommandHolder<In>) -> Result<E, CommandError> {
        let (input, ctx) = holder.parts_mut();
        let input = input.ok_or(CommandError::MissingInput("Input"))?;
        let id = (self.extract_id)(&*input).ok_or(CommandError::MissingInput("ID"))?;

        let entity = self
            .repository
            .find_by_id(&id)
            .map_err(CommandError::repository)?
            .ok_or_else(|| missing::<E>(self.not_found.as_ref(), &id))?;

        if let Some(hook) = &self.before_update {
            hook(input, &entity, ctx)?;
        }
        let input = &*input;
        let entity = (self.apply)(entity, input, &self.excluded, ctx)?;
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
        debug!(entity = E::NAME, id = %id, "entity updated");
        Ok(saved)
    }
}

impl<E: Entity, In, R> fmt::Debug for UpdateCommand<E, In, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCommand")
            .field("name", &self.name)
            .field("entity", &E::NAME)
            .field("excluded", &self.excluded)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

impl<E, In, R> Command for UpdateCommand<E, In, R>
where
    E: Entity,
    R: Repository<E>
{
    type Input = In;
    type Output = E;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, holder: CommandHolder<In>) -> Result<E, CommandError> {
        run_command(&self.name, &self.lifecycle, holder, |holder| {
            self.update(holder)
        })
    }
}

impl<E, In, R> TransactionalCommand for UpdateCommand<E, In, R>
where
    E: Entity,
    R: Repository<E>
{
}
