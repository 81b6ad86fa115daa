// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The command contract.
//!
//! A command is a named unit of application logic: it takes an input, runs
//! through the [`pipeline`](crate::pipeline) and yields an output or a
//! [`CommandError`].
//!
//! Commands hold no per-invocation state, so one instance can serve
//! concurrent callers.

use std::fmt;

use crate::{
    error::CommandError,
    holder::CommandHolder,
    pipeline::{Lifecycle, run_command},
    transaction::{Transaction, TransactionManager}
};

/// Named operation from `Input` to `Output`.
pub trait Command {
    /// Input type.
    type Input;

    /// Output type.
    type Output;

    /// Name used in logs and in translated errors.
    fn name(&self) -> &str;

    /// Execute with an explicit holder.
    ///
    /// # Errors
    ///
    /// Returns any failure raised by the pipeline or the core operation.
    fn execute(&self, holder: CommandHolder<Self::Input>) -> Result<Self::Output, CommandError>;

    /// Execute with `input` and an empty context.
    ///
    /// # Errors
    ///
    /// Same as [`Command::execute`].
    fn execute_input(&self, input: Self::Input) -> Result<Self::Output, CommandError> {
        self.execute(CommandHolder::with_input(input))
    }

    /// Execute without input.
    ///
    /// # Errors
    ///
    /// Same as [`Command::execute`].
    fn execute_empty(&self) -> Result<Self::Output, CommandError> {
        self.execute(CommandHolder::empty())
    }
}

/// Marker for commands meant to run inside a caller-provided transaction.
///
/// The command does not open the transaction; the caller passes the manager
/// that owns it.
pub trait TransactionalCommand: Command {
    /// Execute within one transaction of `manager`.
    ///
    /// Commits on success and rolls back on any error.
    ///
    /// # Errors
    ///
    /// Returns the command's error, or a repository error when the
    /// transaction cannot begin or commit.
    fn execute_atomic<M>(
        &self,
        manager: &M,
        holder: CommandHolder<Self::Input>
    ) -> Result<Self::Output, CommandError>
    where
        M: TransactionManager
    {
        Transaction::new(manager).run(|_| self.execute(holder))
    }
}

type CoreFn<In, Out> =
    Box<dyn Fn(&mut CommandHolder<In>) -> Result<Out, CommandError> + Send + Sync>;

/// Command assembled from a core closure and a [`Lifecycle`].
///
/// # Example
///
/// ```rust
/// use command_core::{Command, FnCommand};
///
/// let shout = FnCommand::new("Shout", |holder| {
///     Ok(holder.input().map(|s: &String| s.to_uppercase()).unwrap_or_default())
/// });
///
/// assert_eq!(shout.execute_input("hi".to_owned()).ok().as_deref(), Some("HI"));
/// ```
pub struct FnCommand<In, Out> {
    name:      String,
    lifecycle: Lifecycle<In, Out>,
    core:      CoreFn<In, Out>
}

impl<In, Out> FnCommand<In, Out> {
    /// Command running `core` with default hooks.
    pub fn new<F>(name: impl Into<String>, core: F) -> Self
    where
        F: Fn(&mut CommandHolder<In>) -> Result<Out, CommandError> + Send + Sync + 'static
    {
        Self {
            name:      name.into(),
            lifecycle: Lifecycle::new(),
            core:      Box::new(core)
        }
    }

    /// Replace the lifecycle hooks.
    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle<In, Out>) -> Self {
        self.lifecycle = lifecycle;
        self
    }
}

impl<In, Out> fmt::Debug for FnCommand<In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

impl<In, Out> Command for FnCommand<In, Out> {
    type Input = In;
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, holder: CommandHolder<In>) -> Result<Out, CommandError> {
        run_command(&self.name, &self.lifecycle, holder, |holder| (self.core)(holder))
    }
}

impl<In, Out> TransactionalCommand for FnCommand<In, Out> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{context::Context, validation::RuleSet};

    fn greet() -> FnCommand<String, String> {
        FnCommand::new("Greet", |holder: &mut CommandHolder<String>| {
            let name = holder.require_input("name")?;
            let prefix = holder
                .context()
                .attribute::<&'static str>("prefix")
                .copied()
                .unwrap_or("Hello");
            Ok(format!("{prefix}, {name}"))
        })
    }

    #[test]
    fn execute_input_uses_empty_context() {
        assert_eq!(greet().execute_input("Ann".into()).ok().as_deref(), Some("Hello, Ann"));
    }

    #[test]
    fn execute_passes_context() {
        let mut context = Context::new();
        context.set_attribute("prefix", "Hi");
        let holder = CommandHolder::with_input("Bob".to_owned()).with_context(context);
        assert_eq!(greet().execute(holder).ok().as_deref(), Some("Hi, Bob"));
    }

    #[test]
    fn execute_empty_accepts_null_input() {
        let command: FnCommand<String, bool> =
            FnCommand::new("Probe", |holder| Ok(holder.accepts_null_input()));
        assert_eq!(command.execute_empty().ok(), Some(true));
        assert_eq!(greet().name(), "Greet");
    }

    #[test]
    fn execute_empty_fails_when_input_required() {
        let result = greet().execute_empty();
        assert!(matches!(result, Err(CommandError::MissingInput("name"))));
    }

    #[test]
    fn lifecycle_rules_apply() {
        let command = greet().with_lifecycle(Lifecycle::new().rules(RuleSet::new().constraint(
            "name",
            |s: &String| Some(s.as_str()),
            |c| c.not_blank()
        )));
        let err = command.execute_input("  ".into()).err();
        assert!(err.is_some_and(|e| e.is_validation()));
    }

    #[cfg(feature = "memory")]
    #[test]
    fn execute_atomic_commits_through_manager() {
        use crate::{memory::InMemoryRepository, repository::Entity};

        #[derive(Clone)]
        struct Tag(Option<u8>);

        impl Entity for Tag {
            type Id = u8;
            const NAME: &'static str = "Tag";

            fn id(&self) -> Option<&u8> {
                self.0.as_ref()
            }

            fn set_id(&mut self, id: u8) {
                self.0 = Some(id);
            }
        }

        let store = InMemoryRepository::<Tag>::new(|| 1);
        let result = greet().execute_atomic(&store, CommandHolder::with_input("Eve".into()));
        assert_eq!(result.ok().as_deref(), Some("Hello, Eve"));
    }
}
