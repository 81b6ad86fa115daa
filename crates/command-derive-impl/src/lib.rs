// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Derive macros behind `command-derive`.
//!
//! Depend on `command-derive` instead; the generated code refers to items
//! through `::command_derive`.
//!
//! # Attribute Quick Reference
//!
//! ## `#[derive(FieldMap)]`
//!
//! ```rust,ignore
//! #[derive(FieldMap)]
//! #[field_map(into = "Project")]          // Repeatable: one impl per target
//! pub struct ProjectCreateInput {
//!     pub name: Option<String>,           // None leaves the target untouched
//!
//!     #[map(rename = "description")]      // Different name on the target
//!     pub summary: Option<String>,
//!
//!     #[map(try_into)]                    // TryFrom conversion, skipped on failure
//!     pub priority: Option<i64>,
//!
//!     #[map(with = "parse_status")]       // fn(&T) -> Result<U, E: Display>
//!     pub status: Option<String>,
//!
//!     #[map(flatten)]                     // Copies of an embedded source
//!     pub audit: AuditInput,
//!
//!     #[map(skip)]                        // Never copied
//!     pub confirm: bool
//! }
//! ```
//!
//! ## `#[derive(Entity)]`
//!
//! ```rust,ignore
//! #[derive(Clone, Entity)]
//! #[entity(name = "Project")]             // Optional: defaults to the struct name
//! pub struct Project {
//!     #[id]                               // Exactly one; Option<T> gives Id = T
//!     pub id: Option<Uuid>,
//!     pub name: String
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod entity;
mod field_map;
mod utils;

use proc_macro::TokenStream;

/// Derive `FieldMap<Target>` for every `#[field_map(into = "Target")]`.
///
/// Each named field becomes one copy operation, in declaration order,
/// writing the destination field of the same (or renamed) name through
/// `From`. `Option` fields copy only their `Some` value.
///
/// # Field Attributes
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | `#[map(skip)]` | Field is not copied |
/// | `#[map(rename = "x")]` | Write destination field `x` |
/// | `#[map(try_into)]` | Convert with `TryFrom`; failure skips the field |
/// | `#[map(with = "path")]` | Convert with `path(&value) -> Result<_, _>` |
/// | `#[map(flatten)]` | Append the copies of the embedded source |
#[proc_macro_derive(FieldMap, attributes(field_map, map))]
pub fn derive_field_map(input: TokenStream) -> TokenStream {
    field_map::derive(input)
}

/// Derive `Entity` from the field marked `#[id]`.
#[proc_macro_derive(Entity, attributes(entity, id))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
