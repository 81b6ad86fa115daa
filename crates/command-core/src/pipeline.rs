// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fixed execution order shared by every command.
//!
//! ```text
//! validate ─► before ─► core ─► success ─► Ok(output)
//!    │          │        │        │
//!    └──────────┴────────┴────────┴──► error hook ─► Err(error)
//! ```
//!
//! | Step     | Default behaviour                                    |
//! |----------|------------------------------------------------------|
//! | validate | skipped without input or rules                       |
//! | before   | debug log                                            |
//! | core     | supplied by the command                              |
//! | success  | debug log, output returned unchanged                 |
//! | error    | error log, foreign errors wrapped into `Failed`      |
//!
//! A failing step stops the pipeline; later steps never run.

use std::fmt;

use tracing::{debug, error, warn};

use crate::{
    context::VIOLATIONS_KEY,
    error::{CommandError, ValidationError},
    holder::CommandHolder,
    validation::RuleSet
};

type RulesFn<In> = Box<dyn Fn(&CommandHolder<In>) -> Option<RuleSet<In>> + Send + Sync>;
type BeforeFn<In> = Box<dyn Fn(&mut CommandHolder<In>) -> Result<(), CommandError> + Send + Sync>;
type SuccessFn<In, Out> =
    Box<dyn Fn(&mut CommandHolder<In>, Out) -> Result<Out, CommandError> + Send + Sync>;
type ErrorFn<In> = Box<dyn Fn(&CommandHolder<In>, CommandError) -> CommandError + Send + Sync>;

enum Rules<In> {
    Fixed(RuleSet<In>),
    PerCall(RulesFn<In>)
}

/// Optional overrides for the pipeline steps around the core operation.
///
/// Unset hooks fall back to the defaults listed in the module docs.
pub struct Lifecycle<In, Out> {
    rules:   Option<Rules<In>>,
    before:  Option<BeforeFn<In>>,
    success: Option<SuccessFn<In, Out>>,
    error:   Option<ErrorFn<In>>
}

impl<In, Out> Default for Lifecycle<In, Out> {
    fn default() -> Self {
        Self {
            rules:   None,
            before:  None,
            success: None,
            error:   None
        }
    }
}

impl<In, Out> fmt::Debug for Lifecycle<In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("rules", &self.rules.is_some())
            .field("before", &self.before.is_some())
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

impl<In, Out> Lifecycle<In, Out> {
    /// Lifecycle with every step at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate input against a fixed rule set.
    #[must_use]
    pub fn rules(mut self, rules: RuleSet<In>) -> Self {
        self.rules = Some(Rules::Fixed(rules));
        self
    }

    /// Build the rule set per invocation; `None` skips validation.
    ///
    /// Use this when rules depend on the context or on shared state.
    #[must_use]
    pub fn rules_with<F>(mut self, build: F) -> Self
    where
        F: Fn(&CommandHolder<In>) -> Option<RuleSet<In>> + Send + Sync + 'static
    {
        self.rules = Some(Rules::PerCall(Box::new(build)));
        self
    }

    /// Replace the before step.
    #[must_use]
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut CommandHolder<In>) -> Result<(), CommandError> + Send + Sync + 'static
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Replace the success step; it may transform the output.
    #[must_use]
    pub fn on_success<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut CommandHolder<In>, Out) -> Result<Out, CommandError> + Send + Sync + 'static
    {
        self.success = Some(Box::new(hook));
        self
    }

    /// Replace the error step; it decides the error returned to the caller.
    #[must_use]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CommandHolder<In>, CommandError) -> CommandError + Send + Sync + 'static
    {
        self.error = Some(Box::new(hook));
        self
    }

    /// `true` when validation is configured.
    pub const fn has_rules(&self) -> bool {
        self.rules.is_some()
    }
}

/// Run `core` inside the pipeline described by `lifecycle`.
///
/// # Errors
///
/// Returns the error hook's result for any failure in validation, the before
/// step, the core operation or the success step.
pub fn run_command<In, Out, F>(
    name: &str,
    lifecycle: &Lifecycle<In, Out>,
    mut holder: CommandHolder<In>,
    core: F
) -> Result<Out, CommandError>
where
    F: FnOnce(&mut CommandHolder<In>) -> Result<Out, CommandError>
{
    run_steps(name, lifecycle, &mut holder, core).map_err(|err| match &lifecycle.error {
        Some(hook) => hook(&holder, err),
        None => default_error(name, err)
    })
}

fn run_steps<In, Out, F>(
    name: &str,
    lifecycle: &Lifecycle<In, Out>,
    holder: &mut CommandHolder<In>,
    core: F
) -> Result<Out, CommandError>
where
    F: FnOnce(&mut CommandHolder<In>) -> Result<Out, CommandError>
{
    match &lifecycle.rules {
        Some(Rules::Fixed(rules)) => validate(name, rules, holder)?,
        Some(Rules::PerCall(build)) => {
            if let Some(rules) = build(holder) {
                validate(name, &rules, holder)?;
            }
        }
        None => {}
    }

    match &lifecycle.before {
        Some(hook) => hook(holder)?,
        None => debug!(command = name, "executing command")
    }

    let output = core(holder)?;

    match &lifecycle.success {
        Some(hook) => hook(holder, output),
        None => {
            debug!(command = name, "command executed successfully");
            Ok(output)
        }
    }
}

/// Validate the holder's input and record violations in its context.
///
/// Absent input is never validated.
///
/// # Errors
///
/// Returns [`CommandError::Validation`] when any rule is violated.
pub fn validate<In>(
    name: &str,
    rules: &RuleSet<In>,
    holder: &mut CommandHolder<In>
) -> Result<(), CommandError> {
    let Some(input) = holder.input() else {
        return Ok(());
    };
    let violations = rules.validate(input);
    if violations.is_valid() {
        return Ok(());
    }

    let err = ValidationError::new(violations.clone());
    warn!(command = name, violations = %err.summary(), "validation failed");
    holder.context_mut().set_attribute(VIOLATIONS_KEY, violations);
    Err(err.into())
}

/// Default error step: log, then translate foreign errors.
pub fn default_error(name: &str, err: CommandError) -> CommandError {
    error!(command = name, error = %err, "command execution failed");
    err.into_runtime(name)
}
