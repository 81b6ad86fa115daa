// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! Implements `command_derive::Entity` from the single field marked `#[id]`.
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Default, Entity)]
//! #[entity(name = "Project")]
//! pub struct Project {
//!     #[id]
//!     pub id:   Option<Uuid>,
//!     pub name: String
//! }
//!
//! // Generates:
//! impl ::command_derive::Entity for Project {
//!     type Id = Uuid;
//!     const NAME: &'static str = "Project";
//!     fn id(&self) -> Option<&Uuid> { self.id.as_ref() }
//!     fn set_id(&mut self, id: Uuid) { self.id = Some(id); }
//! }
//! ```

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Field, Generics, Ident, Type, parse_macro_input};

use crate::utils::option_inner;

/// Entity-level attributes parsed from `#[entity(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct EntityAttrs {
    ident: Ident,

    generics: Generics,

    /// Display name used in error messages. Defaults to the struct name.
    #[darling(default)]
    name: Option<String>
}

/// Parsed entity: name plus identifier field.
#[derive(Debug)]
struct EntityDef {
    ident:    Ident,
    generics: Generics,
    name:     String,
    id_field: Ident,
    id_type:  Type,
    optional: bool
}

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(&entity).into(),
        Err(err) => err.write_errors().into()
    }
}

impl EntityDef {
    fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;

        let syn::Data::Struct(data) = &input.data else {
            return Err(darling::Error::custom("Entity can only be derived for structs")
                .with_span(&input.ident));
        };

        let ids: Vec<&Field> = data
            .fields
            .iter()
            .filter(|field| field.attrs.iter().any(|a| a.path().is_ident("id")))
            .collect();

        let field = match ids.as_slice() {
            [field] => *field,
            [] => {
                return Err(
                    darling::Error::custom("Entity requires a field marked #[id]")
                        .with_span(&input.ident)
                );
            }
            [_, second, ..] => {
                return Err(darling::Error::custom(
                    "Entity allows only one #[id] field"
                )
                .with_span(*second));
            }
        };

        let id_field = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;
        let (id_type, optional) = match option_inner(&field.ty) {
            Some(inner) => (inner.clone(), true),
            None => (field.ty.clone(), false)
        };
        let name = attrs.name.unwrap_or_else(|| attrs.ident.to_string());

        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            name,
            id_field,
            id_type,
            optional
        })
    }
}

fn generate(entity: &EntityDef) -> TokenStream2 {
    let EntityDef {
        ident,
        generics,
        name,
        id_field,
        id_type,
        optional
    } = entity;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (get, set) = if *optional {
        (
            quote! { self.#id_field.as_ref() },
            quote! { self.#id_field = ::core::option::Option::Some(id); }
        )
    } else {
        (
            quote! { ::core::option::Option::Some(&self.#id_field) },
            quote! { self.#id_field = id; }
        )
    };

    quote! {
        impl #impl_generics ::command_derive::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            const NAME: &'static str = #name;

            fn id(&self) -> ::core::option::Option<&Self::Id> {
                #get
            }

            fn set_id(&mut self, id: Self::Id) {
                #set
            }
        }
    }
}
