// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Invocation envelope passed to [`Command::execute`](crate::Command::execute).

use crate::{context::Context, error::CommandError};

/// Input, context and null-input flag for one command invocation.
///
/// The flag is informational; commands decide how to treat absent input.
/// Create commands and delete commands reject it.
#[derive(Debug)]
pub struct CommandHolder<In> {
    input:             Option<In>,
    context:           Context,
    accept_null_input: bool
}

impl<In> Default for CommandHolder<In> {
    fn default() -> Self {
        Self {
            input:             None,
            context:           Context::default(),
            accept_null_input: false
        }
    }
}

impl<In> CommandHolder<In> {
    /// Holder from parts.
    pub fn new(input: Option<In>, context: Context, accept_null_input: bool) -> Self {
        Self {
            input,
            context,
            accept_null_input
        }
    }

    /// Holder carrying `input` and an empty context.
    pub fn with_input(input: In) -> Self {
        Self::new(Some(input), Context::default(), false)
    }

    /// Holder without input that accepts absent input.
    pub fn empty() -> Self {
        Self::new(None, Context::default(), true)
    }

    /// Replace the context.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Input, if any.
    pub const fn input(&self) -> Option<&In> {
        self.input.as_ref()
    }

    /// Mutable input, if any.
    pub fn input_mut(&mut self) -> Option<&mut In> {
        self.input.as_mut()
    }

    /// Move the input out, leaving `None`.
    pub fn take_input(&mut self) -> Option<In> {
        self.input.take()
    }

    /// Put an input back, replacing any present value.
    pub fn set_input(&mut self, input: In) {
        self.input = Some(input);
    }

    /// Move the input out or fail with [`CommandError::MissingInput`].
    ///
    /// # Errors
    ///
    /// Returns `MissingInput(what)` when no input is present.
    pub fn require_input(&mut self, what: &'static str) -> Result<In, CommandError> {
        self.input.take().ok_or(CommandError::MissingInput(what))
    }

    /// Execution context.
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable execution context.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Borrow the input and the context at the same time.
    pub fn parts_mut(&mut self) -> (Option<&mut In>, &mut Context) {
        (self.input.as_mut(), &mut self.context)
    }

    /// Whether absent input was declared acceptable.
    pub const fn accepts_null_input(&self) -> bool {
        self.accept_null_input
    }

    /// Split into input, context and flag.
    pub fn into_parts(self) -> (Option<In>, Context, bool) {
        (self.input, self.context, self.accept_null_input)
    }
}

impl<In> From<In> for CommandHolder<In> {
    fn from(input: In) -> Self {
        Self::with_input(input)
    }
}
