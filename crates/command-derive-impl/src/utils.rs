// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type helpers shared by the derives.

use syn::{GenericArgument, PathArguments, Type};

/// Check if `ty` is written as `Option<T>`.
pub fn is_option(ty: &Type) -> bool {
    option_inner(ty).is_some()
}

/// The `T` of an `Option<T>`.
///
/// Matches on the last path segment, so `std::option::Option<T>` works too.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None
    }
}
