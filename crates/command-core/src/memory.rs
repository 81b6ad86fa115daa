// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory repository.
//!
//! Backed by a mutex-guarded ordered map. Useful for tests and prototypes.
//! The repository is also its own [`TransactionManager`]: a transaction
//! snapshots the map on begin and restores it on rollback.
//!
//! Transactions are not isolated. Writes from other threads during an open
//! transaction are lost when it rolls back.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Mutex, MutexGuard}
};

use thiserror::Error;

use crate::{
    repository::{Entity, Repository},
    transaction::{TransactionHandle, TransactionManager}
};

/// Errors raised by [`InMemoryRepository`].
#[derive(Debug, Error)]
pub enum MemoryError {
    /// A thread panicked while holding the store lock.
    #[error("in-memory store lock poisoned")]
    Poisoned
}

type IdGenerator<Id> = Box<dyn Fn() -> Id + Send + Sync>;

/// Thread-safe map from identifier to entity.
pub struct InMemoryRepository<E: Entity> {
    rows:    Mutex<BTreeMap<E::Id, E>>,
    next_id: IdGenerator<E::Id>
}

impl<E: Entity> fmt::Debug for InMemoryRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("entity", &E::NAME)
            .field("len", &self.len().ok())
            .finish_non_exhaustive()
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Empty repository; `next_id` mints identifiers for unsaved entities.
    pub fn new<G>(next_id: G) -> Self
    where
        G: Fn() -> E::Id + Send + Sync + 'static
    {
        Self {
            rows:    Mutex::new(BTreeMap::new()),
            next_id: Box::new(next_id)
        }
    }

    /// Repository pre-filled with `entities`; entities without an id get one.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Poisoned`] if the lock is poisoned.
    pub fn seeded<G, I>(next_id: G, entities: I) -> Result<Self, MemoryError>
    where
        G: Fn() -> E::Id + Send + Sync + 'static,
        I: IntoIterator<Item = E>
    {
        let repo = Self::new(next_id);
        for entity in entities {
            repo.save(entity)?;
        }
        Ok(repo)
    }

    fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<E::Id, E>>, MemoryError> {
        self.rows.lock().map_err(|_| MemoryError::Poisoned)
    }

    /// First entity matching `predicate`, in identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Poisoned`] if the lock is poisoned.
    pub fn find_first<P>(&self, predicate: P) -> Result<Option<E>, MemoryError>
    where
        P: Fn(&E) -> bool
    {
        Ok(self.rows()?.values().find(|e| predicate(e)).cloned())
    }

    /// `true` when any entity matches `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Poisoned`] if the lock is poisoned.
    pub fn exists_where<P>(&self, predicate: P) -> Result<bool, MemoryError>
    where
        P: Fn(&E) -> bool
    {
        Ok(self.rows()?.values().any(predicate))
    }

    /// Every entity in identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Poisoned`] if the lock is poisoned.
    pub fn all(&self) -> Result<Vec<E>, MemoryError> {
        Ok(self.rows()?.values().cloned().collect())
    }

    /// Number of stored entities.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Poisoned`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, MemoryError> {
        Ok(self.rows()?.len())
    }

    /// `true` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Poisoned`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, MemoryError> {
        Ok(self.rows()?.is_empty())
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    type Error = MemoryError;

    fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, Self::Error> {
        Ok(self.rows()?.get(id).cloned())
    }

    fn save(&self, mut entity: E) -> Result<E, Self::Error> {
        let id = match entity.id().cloned() {
            Some(id) => id,
            None => {
                let id = (self.next_id)();
                entity.set_id(id.clone());
                id
            }
        };
        self.rows()?.insert(id, entity.clone());
        Ok(entity)
    }

    fn delete_by_id(&self, id: &E::Id) -> Result<(), Self::Error> {
        self.rows()?.remove(id);
        Ok(())
    }

    fn exists_by_id(&self, id: &E::Id) -> Result<bool, Self::Error> {
        Ok(self.rows()?.contains_key(id))
    }
}

/// Snapshot transaction over an [`InMemoryRepository`].
pub struct MemoryTransaction<'t, E: Entity> {
    repo:     &'t InMemoryRepository<E>,
    snapshot: BTreeMap<E::Id, E>
}

impl<E: Entity> fmt::Debug for MemoryTransaction<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTransaction")
            .field("snapshot_len", &self.snapshot.len())
            .finish_non_exhaustive()
    }
}

impl<E: Entity> TransactionManager for InMemoryRepository<E> {
    type Handle<'t>
        = MemoryTransaction<'t, E>
    where
        Self: 't;
    type Error = MemoryError;

    fn begin(&self) -> Result<Self::Handle<'_>, Self::Error> {
        let snapshot = self.rows()?.clone();
        Ok(MemoryTransaction {
            repo: self,
            snapshot
        })
    }
}

impl<E: Entity> TransactionHandle for MemoryTransaction<'_, E> {
    type Error = MemoryError;

    fn commit(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn rollback(self) -> Result<(), Self::Error> {
        *self.repo.rows()? = self.snapshot;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::transaction::Transaction;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id:   Option<u32>,
        text: String
    }

    impl Entity for Note {
        type Id = u32;
        const NAME: &'static str = "Note";

        fn id(&self) -> Option<&u32> {
            self.id.as_ref()
        }

        fn set_id(&mut self, id: u32) {
            self.id = Some(id);
        }
    }

    fn note(text: &str) -> Note {
        Note {
            id:   None,
            text: text.to_owned()
        }
    }

    fn repo() -> InMemoryRepository<Note> {
        let counter = AtomicU32::new(0);
        InMemoryRepository::new(move || counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[test]
    fn save_assigns_ids_in_sequence() {
        let repo = repo();
        let first = repo.save(note("a")).ok();
        let second = repo.save(note("b")).ok();
        assert_eq!(first.and_then(|n| n.id), Some(1));
        assert_eq!(second.and_then(|n| n.id), Some(2));
        assert_eq!(repo.len().ok(), Some(2));
    }

    #[test]
    fn save_with_id_replaces() {
        let repo = repo();
        let saved = repo.save(note("a")).ok();
        let mut edited = saved.unwrap_or_else(|| note("x"));
        edited.text = "edited".into();
        assert!(repo.save(edited).is_ok());
        assert_eq!(repo.len().ok(), Some(1));
        let found = repo.find_by_id(&1).ok().flatten().map(|n| n.text);
        assert_eq!(found.as_deref(), Some("edited"));
    }

    #[test]
    fn delete_and_exists() {
        let repo = repo();
        assert!(repo.save(note("a")).is_ok());
        assert_eq!(repo.exists_by_id(&1).ok(), Some(true));
        assert!(repo.delete_by_id(&1).is_ok());
        assert_eq!(repo.exists_by_id(&1).ok(), Some(false));
        assert_eq!(repo.is_empty().ok(), Some(true));
    }

    #[test]
    fn predicates() {
        let repo = InMemoryRepository::seeded(
            {
                let counter = AtomicU32::new(10);
                move || counter.fetch_add(1, Ordering::SeqCst)
            },
            [note("alpha"), note("beta")]
        );
        let Ok(repo) = repo else {
            panic!("seeding failed");
        };
        assert_eq!(repo.exists_where(|n| n.text == "beta").ok(), Some(true));
        let first = repo.find_first(|n| n.text.starts_with('a')).ok().flatten();
        assert_eq!(first.and_then(|n| n.id), Some(10));
        assert_eq!(repo.all().map(|all| all.len()).ok(), Some(2));
    }

    #[test]
    fn rollback_restores_snapshot() {
        let repo = repo();
        assert!(repo.save(note("kept")).is_ok());
        let result: Result<(), crate::CommandError> = Transaction::new(&repo).run(|_| {
            repo.save(note("discarded")).map_err(crate::CommandError::repository)?;
            Err(crate::CommandError::rejected("abort"))
        });
        assert!(result.is_err());
        assert_eq!(repo.len().ok(), Some(1));
    }

    #[test]
    fn commit_keeps_writes() {
        let repo = repo();
        let result: Result<(), crate::CommandError> = Transaction::new(&repo).run(|_| {
            repo.save(note("kept")).map_err(crate::CommandError::repository)?;
            Ok(())
        });
        assert!(result.is_ok());
        assert_eq!(repo.len().ok(), Some(1));
    }
}
