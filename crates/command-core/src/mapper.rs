// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Name-based field copying between structs.
//!
//! A source type describes how to copy into a destination type by
//! implementing [`FieldMap`], usually through `#[derive(FieldMap)]`. The
//! [`EntityMapper`] drives those copies and applies exclusions.
//!
//! # Copy rules
//!
//! | Source field            | Behaviour                                  |
//! |-------------------------|--------------------------------------------|
//! | `Option<T>` = `None`    | destination untouched, reported absent     |
//! | `Option<T>` = `Some(v)` | destination set from `v`                   |
//! | plain `T`               | destination set from the value             |
//! | conversion fails        | destination untouched, warning logged      |
//! | name excluded           | destination untouched                      |
//!
//! Names without a destination counterpart never appear in the copy list, so
//! they are ignored. Type compatibility is checked when the copy list is
//! generated: the destination field must implement `From` of the source
//! value, which covers identical types and wrapping into `Option`.

use std::{any::type_name, borrow::Cow, collections::BTreeSet, fmt};

use tracing::warn;

/// Result of one field copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Destination field written.
    Copied,
    /// Source value absent; destination untouched.
    Absent,
    /// Conversion failed; destination untouched.
    Failed(String)
}

type CopyFn<S, D> = Box<dyn Fn(&S, &mut D) -> CopyOutcome + Send + Sync>;

/// Named copy operation from `S` into `D`.
pub struct FieldCopy<S, D> {
    name: &'static str,
    copy: CopyFn<S, D>
}

impl<S, D> FieldCopy<S, D> {
    /// Copy operation for the destination field `name`.
    pub fn new<F>(name: &'static str, copy: F) -> Self
    where
        F: Fn(&S, &mut D) -> CopyOutcome + Send + Sync + 'static
    {
        Self {
            name,
            copy: Box::new(copy)
        }
    }

    /// Destination field name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Run the copy.
    pub fn apply(&self, source: &S, destination: &mut D) -> CopyOutcome {
        (self.copy)(source, destination)
    }

    /// Lift the copy to an outer source that embeds `S`.
    ///
    /// Used for flattened fields.
    pub fn nested<P>(self, project: fn(&P) -> &S) -> FieldCopy<P, D>
    where
        S: 'static,
        D: 'static,
        P: 'static
    {
        let inner = self.copy;
        FieldCopy {
            name: self.name,
            copy: Box::new(move |outer: &P, destination: &mut D| {
                inner(project(outer), destination)
            })
        }
    }
}

impl<S, D> fmt::Debug for FieldCopy<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCopy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Source type that knows how to copy its fields into `D`.
///
/// Implement with `#[derive(FieldMap)]` and `#[field_map(into = "D")]`.
pub trait FieldMap<D>: Sized {
    /// Copy operations in declaration order, one per destination name.
    fn field_copies() -> Vec<FieldCopy<Self, D>>;
}

/// Write `value` into `slot` through `From`.
///
/// Generated copies call this so that `T` lands in both `T` and `Option<T>`
/// destinations.
#[inline]
pub fn assign<D, V>(slot: &mut D, value: V)
where
    D: From<V>
{
    *slot = D::from(value);
}

/// Write `value` into `slot` through `TryFrom`.
///
/// # Errors
///
/// Returns the rendered conversion error and leaves `slot` untouched.
#[inline]
pub fn try_assign<D, V>(slot: &mut D, value: V) -> Result<(), String>
where
    D: TryFrom<V>,
    D::Error: fmt::Display
{
    *slot = D::try_from(value).map_err(|err| err.to_string())?;
    Ok(())
}

/// Audit-managed names skipped when building a new entity.
pub const CREATE_EXCLUDED: [&str; 5] = ["id", "created_at", "updated_at", "created_by", "updated_by"];

/// Names skipped when updating an existing entity.
pub const UPDATE_EXCLUDED: [&str; 3] = ["id", "created_at", "created_by"];

/// Set of destination field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeSet<Cow<'static, str>>);

impl FieldSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclusions for create commands.
    pub fn create_defaults() -> Self {
        CREATE_EXCLUDED.into_iter().collect()
    }

    /// Exclusions for update commands.
    pub fn update_defaults() -> Self {
        UPDATE_EXCLUDED.into_iter().collect()
    }

    /// Add a name.
    #[must_use]
    pub fn with(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.0.insert(name.into());
        self
    }

    /// Remove a name.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.0.remove(name);
        self
    }

    /// Add a name in place.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>) {
        self.0.insert(name.into());
    }

    /// `true` when `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|name| &**name)
    }
}

impl FromIterator<&'static str> for FieldSet {
    fn from_iter<I: IntoIterator<Item = &'static str>>(iter: I) -> Self {
        Self(iter.into_iter().map(Cow::Borrowed).collect())
    }
}

impl FromIterator<String> for FieldSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().map(Cow::Owned).collect())
    }
}

/// Per-field outcome of a mapping run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapReport {
    copied:   Vec<&'static str>,
    absent:   Vec<&'static str>,
    excluded: Vec<&'static str>,
    failed:   Vec<(&'static str, String)>
}

impl MapReport {
    /// Fields written, in copy order.
    pub fn copied(&self) -> &[&'static str] {
        &self.copied
    }

    /// Fields whose source value was absent.
    pub fn absent(&self) -> &[&'static str] {
        &self.absent
    }

    /// Fields skipped by exclusion or selection.
    pub fn excluded(&self) -> &[&'static str] {
        &self.excluded
    }

    /// Fields whose conversion failed, with the error text.
    pub fn failed(&self) -> &[(&'static str, String)] {
        &self.failed
    }

    /// `true` when no conversion failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// `true` when `name` was written.
    pub fn was_copied(&self, name: &str) -> bool {
        self.copied.contains(&name)
    }
}

/// Stateless driver for [`FieldMap`] copies.
///
/// Mapping is best effort: failures are logged and reported, never returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityMapper;

impl EntityMapper {
    /// Create a mapper.
    pub const fn new() -> Self {
        Self
    }

    /// Copy every non-excluded field of `source` onto `destination`.
    pub fn map<S, D>(&self, source: &S, destination: &mut D, excluded: &FieldSet) -> MapReport
    where
        S: FieldMap<D>
    {
        self.run(source, destination, |name| !excluded.contains(name))
    }

    /// Copy only the fields named in `fields`.
    ///
    /// Names that the source does not provide are ignored.
    pub fn update_fields<S, D>(&self, source: &S, destination: &mut D, fields: &[&str]) -> MapReport
    where
        S: FieldMap<D>
    {
        self.run(source, destination, |name| fields.contains(&name))
    }

    /// Map onto a fresh `D::default()`.
    pub fn map_new<S, D>(&self, source: &S, excluded: &FieldSet) -> D
    where
        S: FieldMap<D>,
        D: Default
    {
        let mut destination = D::default();
        self.map(source, &mut destination, excluded);
        destination
    }

    /// Like [`EntityMapper::map_new`], `None` for an absent source.
    pub fn map_optional<S, D>(&self, source: Option<&S>, excluded: &FieldSet) -> Option<D>
    where
        S: FieldMap<D>,
        D: Default
    {
        source.map(|source| self.map_new(source, excluded))
    }

    /// Map every source onto a fresh destination, preserving order.
    pub fn map_all<'s, S, D, I>(&self, sources: I, excluded: &FieldSet) -> Vec<D>
    where
        S: FieldMap<D> + 's,
        D: Default,
        I: IntoIterator<Item = &'s S>
    {
        sources
            .into_iter()
            .map(|source| self.map_new(source, excluded))
            .collect()
    }

    fn run<S, D, F>(&self, source: &S, destination: &mut D, selected: F) -> MapReport
    where
        S: FieldMap<D>,
        F: Fn(&str) -> bool
    {
        let mut report = MapReport::default();
        for copy in S::field_copies() {
            let name = copy.name();
            if !selected(name) {
                report.excluded.push(name);
                continue;
            }
            match copy.apply(source, destination) {
                CopyOutcome::Copied => report.copied.push(name),
                CopyOutcome::Absent => report.absent.push(name),
                CopyOutcome::Failed(error) => {
                    warn!(
                        field = name,
                        source = short_type_name::<S>(),
                        destination = short_type_name::<D>(),
                        error = %error,
                        "failed to copy field"
                    );
                    report.failed.push((name, error));
                }
            }
        }
        report
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
