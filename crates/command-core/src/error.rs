// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy for command execution.
//!
//! Every command returns [`CommandError`]. The variants separate failures the
//! caller can act on (validation, missing entity, missing input) from storage
//! and foreign failures.
//!
//! | Variant        | Raised by                              | Passed through error hook |
//! |----------------|----------------------------------------|---------------------------|
//! | `Validation`   | pipeline validation step               | unchanged                 |
//! | `NotFound`     | update and delete entity lookup        | unchanged                 |
//! | `MissingInput` | create, update and delete input checks | unchanged                 |
//! | `Construction` | entity construction or id extraction   | unchanged                 |
//! | `Repository`   | repository calls                       | unchanged                 |
//! | `Rejected`     | hooks refusing an operation            | unchanged                 |
//! | `External`     | foreign errors raised from hooks       | wrapped into `Failed`     |

use std::{error::Error as StdError, fmt::Write as _};

use thiserror::Error;

use crate::{
    transaction::TransactionError,
    validation::{Violation, Violations}
};

/// Boxed error used for repository and foreign failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Validation failure carrying every violation found for the input.
///
/// The message reads `Validation failed: name: msg, other: msg` with
/// violations in detection order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {summary}")]
pub struct ValidationError {
    summary:    String,
    violations: Violations
}

impl ValidationError {
    /// Create a validation error from collected violations.
    pub fn new(violations: Violations) -> Self {
        Self {
            summary: violations.summary(),
            violations
        }
    }

    /// Violations in detection order.
    pub const fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Take ownership of the violations.
    pub fn into_violations(self) -> Violations {
        self.violations
    }

    /// Joined `name: message` pairs.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Message followed by one indented line per violation.
    ///
    /// ```text
    /// Validation failed: name: Project name is required
    /// Violations:
    ///   - name: Project name is required
    /// ```
    pub fn detailed_message(&self) -> String {
        let mut out = self.to_string();
        if self.violations.is_valid() {
            return out;
        }
        out.push_str("\nViolations:");
        for violation in &self.violations {
            let _ = write!(out, "\n  - {}: {}", violation.name(), violation.message());
        }
        out
    }
}

impl From<Violations> for ValidationError {
    fn from(violations: Violations) -> Self {
        Self::new(violations)
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self::new(Violations::from(vec![violation]))
    }
}

/// Error returned by command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input failed its rule set.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity lookup by identifier found nothing.
    #[error("{entity} not found with ID: {id}")]
    NotFound {
        /// Entity display name.
        entity: &'static str,
        /// Rendered identifier.
        id:     String
    },

    /// Required input or identifier was absent.
    #[error("{0} cannot be null")]
    MissingInput(&'static str),

    /// Entity could not be constructed or carries no identifier after save.
    #[error("failed to construct {entity}: {message}")]
    Construction {
        /// Entity display name.
        entity:  &'static str,
        /// Failure description.
        message: String
    },

    /// Repository call failed.
    #[error("repository operation failed: {0}")]
    Repository(#[source] BoxError),

    /// A hook refused the operation.
    #[error("{0}")]
    Rejected(String),

    /// Foreign error raised from user code, not yet translated.
    #[error("{0}")]
    External(#[source] BoxError),

    /// Foreign error wrapped by the error hook.
    #[error("command execution failed: {command}")]
    Failed {
        /// Name of the failing command.
        command: String,
        /// Original error.
        #[source]
        source:  BoxError
    }
}

impl CommandError {
    /// Not-found error for an entity type and identifier.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string()
        }
    }

    /// Wrap a repository failure.
    pub fn repository(err: impl Into<BoxError>) -> Self {
        Self::Repository(err.into())
    }

    /// Wrap a foreign failure raised from user code.
    pub fn external(err: impl Into<BoxError>) -> Self {
        Self::External(err.into())
    }

    /// Refuse the operation with a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Construction failure for an entity type.
    pub fn construction(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Construction {
            entity,
            message: message.into()
        }
    }

    /// Check if this is a validation error.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a not-found error.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a missing-input error.
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput(_))
    }

    /// Check if the error belongs to the command taxonomy.
    ///
    /// Only [`CommandError::External`] is foreign.
    pub const fn is_runtime(&self) -> bool {
        !matches!(self, Self::External(_))
    }

    /// Violations of a validation error.
    pub const fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Validation(err) => Some(err.violations()),
            _ => None
        }
    }

    /// Translate a foreign error into [`CommandError::Failed`].
    ///
    /// Taxonomy errors come back unchanged.
    pub fn into_runtime(self, command: &str) -> Self {
        match self {
            Self::External(source) => Self::Failed {
                command: command.to_owned(),
                source
            },
            other => other
        }
    }
}

impl<E> From<TransactionError<E>> for CommandError
where
    E: StdError + Send + Sync + 'static
{
    fn from(err: TransactionError<E>) -> Self {
        Self::Repository(Box::new(err))
    }
}
