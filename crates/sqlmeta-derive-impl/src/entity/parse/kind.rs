// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property kind inference.
//!
//! Maps the Rust type of a field to the coarse kind the runtime uses for
//! tenant coercion and logic-delete predicates.
//!
//! | Rust Type | Kind |
//! |-----------|------|
//! | `String`, `&str`, `char` | `Text` |
//! | `i8`..`i128`, `u8`..`u128`, `isize`, `usize` | `Integer` |
//! | `f32`, `f64`, `Decimal` | `Float` |
//! | `bool` | `Boolean` |
//! | `Uuid` | `Uuid` |
//! | `DateTime<_>`, `NaiveDateTime`, `NaiveDate`, `NaiveTime`, `OffsetDateTime`, `PrimitiveDateTime`, `SystemTime` | `Timestamp` |
//! | `Option<T>` | kind of `T`, nullable |
//! | anything else | `Other` |
//!
//! `#[column(kind = "...")]` overrides the inferred kind.

use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Type;

/// Compile-time mirror of `sqlmeta::PropertyKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Text,
    Integer,
    Float,
    Boolean,
    Uuid,
    Timestamp,
    Other
}

impl PropertyKind {
    /// Infer the kind of a field type, looking through `Option`.
    #[must_use]
    pub fn infer(ty: &Type) -> Self {
        let ty = option_inner(ty).unwrap_or(ty);

        match ty {
            Type::Reference(reference) => Self::infer(&reference.elem),
            Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .map_or(Self::Other, |segment| {
                    Self::from_ident(&segment.ident.to_string())
                }),
            _ => Self::Other
        }
    }

    fn from_ident(ident: &str) -> Self {
        match ident {
            "String" | "str" | "char" => Self::Text,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => Self::Integer,
            "f32" | "f64" | "Decimal" => Self::Float,
            "bool" => Self::Boolean,
            "Uuid" => Self::Uuid,
            "DateTime" | "NaiveDateTime" | "NaiveDate" | "NaiveTime" | "OffsetDateTime"
            | "PrimitiveDateTime" | "SystemTime" => Self::Timestamp,
            _ => Self::Other
        }
    }
}

impl FromMeta for PropertyKind {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().as_str() {
            "text" | "string" => Ok(Self::Text),
            "integer" | "int" => Ok(Self::Integer),
            "float" | "decimal" => Ok(Self::Float),
            "boolean" | "bool" => Ok(Self::Boolean),
            "uuid" => Ok(Self::Uuid),
            "timestamp" => Ok(Self::Timestamp),
            "other" => Ok(Self::Other),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

impl ToTokens for PropertyKind {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            Self::Text => quote!(Text),
            Self::Integer => quote!(Integer),
            Self::Float => quote!(Float),
            Self::Boolean => quote!(Boolean),
            Self::Uuid => quote!(Uuid),
            Self::Timestamp => quote!(Timestamp),
            Self::Other => quote!(Other)
        };
        tokens.extend(quote!(::sqlmeta::PropertyKind::#variant));
    }
}

/// Extract the inner type from `Option<T>`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}
