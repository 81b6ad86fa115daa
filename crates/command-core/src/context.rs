// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-execution attribute store.
//!
//! A [`Context`] travels with a command invocation. Hooks use it to pass
//! values to later steps; the pipeline records validation violations under
//! [`VIOLATIONS_KEY`].

use std::{any::Any, collections::HashMap, fmt};

use crate::validation::Violations;

/// Attribute key under which failed validation stores its violations.
pub const VIOLATIONS_KEY: &str = "violations";

/// Key/value bag with optional user and tenant identifiers.
///
/// Not synchronised; one context belongs to one execution.
#[derive(Default)]
pub struct Context {
    attributes: HashMap<String, Box<dyn Any + Send + Sync>>,
    user_id:    Option<String>,
    tenant_id:  Option<String>
}

impl Context {
    /// Empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with a user identifier.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Context with a tenant identifier.
    #[must_use]
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Store a value, replacing any previous value under the key.
    pub fn set_attribute<V>(&mut self, key: impl Into<String>, value: V)
    where
        V: Any + Send + Sync
    {
        self.attributes.insert(key.into(), Box::new(value));
    }

    /// Value under `key` if present and of type `V`.
    pub fn attribute<V: Any>(&self, key: &str) -> Option<&V> {
        self.attributes.get(key)?.downcast_ref()
    }

    /// Mutable value under `key` if present and of type `V`.
    pub fn attribute_mut<V: Any>(&mut self, key: &str) -> Option<&mut V> {
        self.attributes.get_mut(key)?.downcast_mut()
    }

    /// `true` when any value is stored under `key`.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Remove and return the value under `key` if it is of type `V`.
    ///
    /// A value of another type stays in place.
    pub fn remove_attribute<V: Any>(&mut self, key: &str) -> Option<V> {
        if !self.attributes.get(key)?.is::<V>() {
            return None;
        }
        let boxed = self.attributes.remove(key)?;
        boxed.downcast::<V>().ok().map(|value| *value)
    }

    /// Violations recorded by a failed validation step.
    pub fn violations(&self) -> Option<&Violations> {
        self.attribute(VIOLATIONS_KEY)
    }

    /// Acting user identifier.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Set the acting user identifier.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    /// Tenant identifier.
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Set the tenant identifier.
    pub fn set_tenant_id(&mut self, tenant_id: impl Into<String>) {
        self.tenant_id = Some(tenant_id.into());
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.attributes.keys().collect();
        keys.sort();
        f.debug_struct("Context")
            .field("attributes", &keys)
            .field("user_id", &self.user_id)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}
