// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transaction support for commands.
//!
//! Commands never open transactions themselves. A caller that wants atomic
//! execution wraps the call with [`Transaction::run`], or uses
//! [`TransactionalCommand::execute_atomic`](crate::TransactionalCommand::execute_atomic).
//!
//! # Overview
//!
//! - [`TransactionManager`] opens transactions
//! - [`TransactionHandle`] commits or rolls back an open transaction
//! - [`Transaction`] runs a closure with commit on `Ok` and rollback on `Err`
//! - [`TransactionError`] tells which transaction step failed
//!
//! # Example
//!
//! ```rust,ignore
//! use command_derive::prelude::*;
//!
//! let id = Transaction::new(&store).run(|_tx| {
//!     create_project.execute_input(input)
//! })?;
//! ```

use std::{error::Error as StdError, fmt};

use tracing::{debug, error};

/// Error type for transaction operations.
#[derive(Debug)]
pub enum TransactionError<E> {
    /// Failed to begin transaction.
    Begin(E),

    /// Failed to commit transaction.
    Commit(E),

    /// Failed to rollback transaction.
    Rollback(E)
}

impl<E: fmt::Display> fmt::Display for TransactionError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin(e) => write!(f, "failed to begin transaction: {e}"),
            Self::Commit(e) => write!(f, "failed to commit transaction: {e}"),
            Self::Rollback(e) => write!(f, "failed to rollback transaction: {e}")
        }
    }
}

impl<E: StdError + 'static> StdError for TransactionError<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Begin(e) | Self::Commit(e) | Self::Rollback(e) => Some(e)
        }
    }
}

impl<E> TransactionError<E> {
    /// Check if this is a begin error.
    pub const fn is_begin(&self) -> bool {
        matches!(self, Self::Begin(_))
    }

    /// Check if this is a commit error.
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Commit(_))
    }

    /// Check if this is a rollback error.
    pub const fn is_rollback(&self) -> bool {
        matches!(self, Self::Rollback(_))
    }

    /// Get the inner error.
    pub fn into_inner(self) -> E {
        match self {
            Self::Begin(e) | Self::Commit(e) | Self::Rollback(e) => e
        }
    }
}

/// Source of transactions, such as a connection pool or an in-memory store.
pub trait TransactionManager {
    /// Open transaction type.
    type Handle<'t>: TransactionHandle<Error = Self::Error>
    where
        Self: 't;

    /// Error type for transaction operations.
    type Error: StdError + Send + Sync + 'static;

    /// Begin a new transaction.
    fn begin(&self) -> Result<Self::Handle<'_>, Self::Error>;
}

/// Open transaction that can be committed or rolled back.
pub trait TransactionHandle: Sized {
    /// Error type.
    type Error;

    /// Commit the transaction.
    fn commit(self) -> Result<(), Self::Error>;

    /// Rollback the transaction.
    fn rollback(self) -> Result<(), Self::Error>;
}

/// Runs a closure inside one transaction of `M`.
pub struct Transaction<'m, M> {
    manager: &'m M
}

impl<'m, M: TransactionManager> Transaction<'m, M> {
    /// Create a transaction runner.
    pub const fn new(manager: &'m M) -> Self {
        Self {
            manager
        }
    }

    /// Get reference to the underlying manager.
    pub const fn manager(&self) -> &'m M {
        self.manager
    }

    /// Execute `f` within a transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back when it returns `Err`. A
    /// failed rollback is logged and the closure's error is returned.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`TransactionError`] converted into
    /// `E` when begin or commit fails.
    pub fn run<F, T, E>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut M::Handle<'m>) -> Result<T, E>,
        E: From<TransactionError<M::Error>>
    {
        let mut handle = self.manager.begin().map_err(TransactionError::Begin)?;
        debug!("transaction started");

        match f(&mut handle) {
            Ok(value) => {
                handle.commit().map_err(TransactionError::Commit)?;
                debug!("transaction committed");
                Ok(value)
            }
            Err(err) => {
                match handle.rollback() {
                    Ok(()) => debug!("transaction rolled back"),
                    Err(rollback) => {
                        error!(error = %TransactionError::Rollback(rollback), "rollback failed");
                    }
                }
                Err(err)
            }
        }
    }
}
