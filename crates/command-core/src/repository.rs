// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persistence seam for CRUD commands.
//!
//! CRUD commands only need four storage operations. Any store that can find,
//! save and delete by identifier can back them.

use std::{error::Error as StdError, fmt, sync::Arc};

/// Persistable type with an identifier.
///
/// Derive with `#[derive(Entity)]` and mark the identifier field with `#[id]`.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type.
    type Id: Clone + Eq + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Display name used in error messages.
    const NAME: &'static str;

    /// Identifier, `None` before the first save.
    fn id(&self) -> Option<&Self::Id>;

    /// Assign the identifier.
    fn set_id(&mut self, id: Self::Id);
}

/// Storage for one entity type.
///
/// Calls are synchronous and every call stands alone. Use
/// [`TransactionManager`](crate::TransactionManager) to group calls.
pub trait Repository<E: Entity>: Send + Sync {
    /// Error type for storage failures.
    type Error: StdError + Send + Sync + 'static;

    /// Find an entity by identifier.
    fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, Self::Error>;

    /// Insert or replace an entity and return the stored state.
    ///
    /// Stores assign an identifier when the entity has none.
    fn save(&self, entity: E) -> Result<E, Self::Error>;

    /// Delete an entity by identifier.
    fn delete_by_id(&self, id: &E::Id) -> Result<(), Self::Error>;

    /// `true` when an entity exists for the identifier.
    fn exists_by_id(&self, id: &E::Id) -> Result<bool, Self::Error> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

impl<E, R> Repository<E> for Arc<R>
where
    E: Entity,
    R: Repository<E> + ?Sized
{
    type Error = R::Error;

    fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, Self::Error> {
        (**self).find_by_id(id)
    }

    fn save(&self, entity: E) -> Result<E, Self::Error> {
        (**self).save(entity)
    }

    fn delete_by_id(&self, id: &E::Id) -> Result<(), Self::Error> {
        (**self).delete_by_id(id)
    }

    fn exists_by_id(&self, id: &E::Id) -> Result<bool, Self::Error> {
        (**self).exists_by_id(id)
    }
}
