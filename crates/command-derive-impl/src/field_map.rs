// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! FieldMap derive macro implementation.
//!
//! Turns a source struct into `impl FieldMap<Target>` blocks, one per
//! `#[field_map(into = "Target")]`.
//!
//! # Architecture
//!
//! ```text
//! field_map/
//! ├── parse.rs    — FieldMapDef, MapField and #[map(...)] parsing
//! └── generate.rs — FieldCopy construction per field and target
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(FieldMap)]
//! #[field_map(into = "Project")]
//! pub struct ProjectCreateInput {
//!     pub name:        Option<String>,
//!     pub description: Option<String>
//! }
//!
//! // Generates:
//! impl ::command_derive::FieldMap<Project> for ProjectCreateInput {
//!     fn field_copies() -> Vec<::command_derive::FieldCopy<Self, Project>> {
//!         let mut copies = Vec::new();
//!         copies.push(::command_derive::FieldCopy::new("name", |source, destination| {
//!             match &source.name { /* ... */ }
//!         }));
//!         // ...
//!         copies
//!     }
//! }
//! ```

mod generate;
mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::FieldMapDef;

/// Main entry point for the FieldMap derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match FieldMapDef::from_derive_input(&input) {
        Ok(def) => generate::generate(&def).into(),
        Err(err) => err.write_errors().into()
    }
}
