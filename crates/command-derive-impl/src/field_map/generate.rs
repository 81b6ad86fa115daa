// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Code generation for `#[derive(FieldMap)]`.
//!
//! Own fields become copies in declaration order. Flattened fields are
//! appended afterwards, skipping names already present.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

use super::parse::{FieldMapDef, MapField, MapMode};
use crate::utils::is_option;

/// Generate one `FieldMap` impl per target.
pub fn generate(def: &FieldMapDef) -> TokenStream {
    let impls = def.targets.iter().map(|target| generate_impl(def, target));
    quote! { #(#impls)* }
}

fn generate_impl(def: &FieldMapDef, target: &Path) -> TokenStream {
    let ident = &def.ident;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();

    let own = def
        .fields
        .iter()
        .filter(|field| field.writes_target())
        .map(|field| own_copy(field, target));
    let flattened = def
        .fields
        .iter()
        .filter(|field| field.mode == MapMode::Flatten)
        .map(|field| flattened_copies(field, target));

    quote! {
        impl #impl_generics ::command_derive::FieldMap<#target> for #ident #ty_generics #where_clause {
            fn field_copies() -> ::std::vec::Vec<::command_derive::FieldCopy<Self, #target>> {
                let mut copies: ::std::vec::Vec<::command_derive::FieldCopy<Self, #target>> =
                    ::std::vec::Vec::new();
                #(#own)*
                #(#flattened)*
                copies
            }
        }
    }
}

fn own_copy(field: &MapField, target: &Path) -> TokenStream {
    let source = &field.ident;
    let name = field.target.to_string();
    let convert = convert(field);

    let body = if is_option(&field.ty) {
        quote! {
            match &source.#source {
                ::core::option::Option::Some(value) => { #convert }
                ::core::option::Option::None => ::command_derive::CopyOutcome::Absent
            }
        }
    } else {
        quote! {
            let value = &source.#source;
            #convert
        }
    };

    quote! {
        copies.push(::command_derive::FieldCopy::new(
            #name,
            |source: &Self, destination: &mut #target| { #body }
        ));
    }
}

/// Conversion of `value: &T` into the destination slot.
fn convert(field: &MapField) -> TokenStream {
    let slot = &field.target;
    match &field.mode {
        MapMode::TryInto => quote! {
            match ::command_derive::mapper::try_assign(
                &mut destination.#slot,
                ::core::clone::Clone::clone(value)
            ) {
                ::core::result::Result::Ok(()) => ::command_derive::CopyOutcome::Copied,
                ::core::result::Result::Err(error) => ::command_derive::CopyOutcome::Failed(error)
            }
        },
        MapMode::With(path) => quote! {
            match #path(value) {
                ::core::result::Result::Ok(converted) => {
                    ::command_derive::mapper::assign(&mut destination.#slot, converted);
                    ::command_derive::CopyOutcome::Copied
                }
                ::core::result::Result::Err(error) => ::command_derive::CopyOutcome::Failed(
                    ::std::string::ToString::to_string(&error)
                )
            }
        },
        MapMode::Direct | MapMode::Flatten | MapMode::Skip => quote! {
            ::command_derive::mapper::assign(&mut destination.#slot, ::core::clone::Clone::clone(value));
            ::command_derive::CopyOutcome::Copied
        }
    }
}

fn flattened_copies(field: &MapField, target: &Path) -> TokenStream {
    let source = &field.ident;
    let ty = &field.ty;
    quote! {
        for copy in <#ty as ::command_derive::FieldMap<#target>>::field_copies() {
            if copies.iter().all(|existing| existing.name() != copy.name()) {
                copies.push(copy.nested::<Self>(|source| &source.#source));
            }
        }
    }
}
