// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsing of `#[field_map(...)]` and `#[map(...)]`.
//!
//! # Supported Attributes
//!
//! | Attribute | Level | Description |
//! |-----------|-------|-------------|
//! | `into = "Path"` | container, repeatable | Destination type |
//! | `skip` | field | Do not copy |
//! | `rename = "name"` | field | Destination field name |
//! | `try_into` | field | `TryFrom` conversion |
//! | `with = "path"` | field | Custom fallible conversion |
//! | `flatten` | field | Embedded source implementing `FieldMap` |

use darling::FromDeriveInput;
use syn::{Attribute, DeriveInput, Field, Generics, Ident, LitStr, Path, Type};

/// Container attributes parsed by darling.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(field_map), supports(struct_named))]
struct FieldMapAttrs {
    ident: Ident,

    generics: Generics,

    /// Every `into = "..."` in declaration order.
    #[darling(multiple, rename = "into")]
    targets: Vec<Path>
}

/// How a field reaches the destination.
#[derive(Debug, Clone, PartialEq)]
pub enum MapMode {
    /// `From` conversion.
    Direct,
    /// `TryFrom` conversion.
    TryInto,
    /// Custom conversion function.
    With(Path),
    /// Embedded source whose copies are appended.
    Flatten,
    /// Not copied.
    Skip
}

/// One source field.
#[derive(Debug)]
pub struct MapField {
    /// Source field identifier.
    pub ident: Ident,

    /// Source field type.
    pub ty: Type,

    /// Destination field identifier.
    pub target: Ident,

    /// Conversion mode.
    pub mode: MapMode
}

/// Complete parsed source struct.
#[derive(Debug)]
pub struct FieldMapDef {
    /// Source struct identifier.
    pub ident: Ident,

    /// Source struct generics.
    pub generics: Generics,

    /// Destination types.
    pub targets: Vec<Path>,

    /// Fields in declaration order.
    pub fields: Vec<MapField>
}

impl FieldMapDef {
    /// Parse the source struct.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union, tuple or unit struct
    /// - No `into` target
    /// - Unknown or conflicting `#[map(...)]` options
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = FieldMapAttrs::from_derive_input(input)?;

        if attrs.targets.is_empty() {
            return Err(darling::Error::custom(
                "FieldMap requires at least one #[field_map(into = \"Target\")]"
            )
            .with_span(&input.ident));
        }

        let syn::Data::Struct(data) = &input.data else {
            return Err(
                darling::Error::custom("FieldMap can only be derived for structs")
                    .with_span(&input.ident)
            );
        };

        let mut errors = darling::Error::accumulator();
        let fields: Vec<MapField> = data
            .fields
            .iter()
            .filter_map(|field| errors.handle(MapField::from_field(field)))
            .collect();

        let mut seen = std::collections::HashSet::new();
        for field in fields.iter().filter(|f| f.writes_target()) {
            if !seen.insert(field.target.to_string()) {
                errors.push(
                    darling::Error::custom(format!(
                        "destination field `{}` is written by more than one source field",
                        field.target
                    ))
                    .with_span(&field.ident)
                );
            }
        }
        errors.finish()?;

        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            targets: attrs.targets,
            fields
        })
    }
}

impl MapField {
    /// Parse one named field and its `#[map(...)]` attributes.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("FieldMap fields must be named").with_span(field)
        })?;

        let mut options = MapOptions::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("map")) {
            options.parse(attr)?;
        }
        let mode = options.mode(field)?;
        let target = match options.rename {
            Some(name) => name.parse::<Ident>()?,
            None => ident.clone()
        };

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            target,
            mode
        })
    }

    /// Check if the field writes its own destination field.
    ///
    /// Skipped and flattened fields do not.
    #[must_use]
    pub fn writes_target(&self) -> bool {
        !matches!(self.mode, MapMode::Skip | MapMode::Flatten)
    }
}

#[derive(Debug, Default)]
struct MapOptions {
    skip:     bool,
    flatten:  bool,
    try_into: bool,
    with:     Option<Path>,
    rename:   Option<LitStr>
}

impl MapOptions {
    fn parse(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                self.skip = true;
            } else if meta.path.is_ident("flatten") {
                self.flatten = true;
            } else if meta.path.is_ident("try_into") {
                self.try_into = true;
            } else if meta.path.is_ident("rename") {
                self.rename = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("with") {
                let lit: LitStr = meta.value()?.parse()?;
                self.with = Some(lit.parse()?);
            } else {
                return Err(meta.error(
                    "unknown map option, expected one of: skip, rename, flatten, try_into, with"
                ));
            }
            Ok(())
        })
    }

    fn mode(&self, field: &Field) -> darling::Result<MapMode> {
        let conflict = |message: &str| Err(darling::Error::custom(message).with_span(field));

        if self.skip {
            if self.flatten || self.try_into || self.with.is_some() || self.rename.is_some() {
                return conflict("#[map(skip)] cannot be combined with other map options");
            }
            return Ok(MapMode::Skip);
        }
        if self.flatten {
            if self.try_into || self.with.is_some() || self.rename.is_some() {
                return conflict("#[map(flatten)] cannot be combined with other map options");
            }
            return Ok(MapMode::Flatten);
        }
        match (&self.with, self.try_into) {
            (Some(_), true) => conflict("#[map(with)] and #[map(try_into)] are mutually exclusive"),
            (Some(path), false) => Ok(MapMode::With(path.clone())),
            (None, true) => Ok(MapMode::TryInto),
            (None, false) => Ok(MapMode::Direct)
        }
    }
}
