// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Persistent` generation.
//!
//! Each persistent field becomes one `PropertyDef` builder chain inside a
//! `static` schema. Builder calls are emitted only when they change the
//! default, so a plain `name: String` field expands to
//! `PropertyDef::new("name", PropertyKind::Text).typed("String")`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{EntityDef, FieldDef};

/// Generate the `Persistent` implementation.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let name = entity.name_str();
    let table = &entity.table;
    let schema = match &entity.schema {
        Some(schema) => quote!(::core::option::Option::Some(#schema)),
        None => quote!(::core::option::Option::None)
    };
    let properties = entity
        .persistent_fields()
        .map(|field| property(entity, field));

    quote! {
        impl ::sqlmeta::Persistent for #ident {
            fn schema() -> &'static ::sqlmeta::EntitySchema {
                static SCHEMA: ::sqlmeta::EntitySchema = ::sqlmeta::EntitySchema {
                    name: #name,
                    table: #table,
                    schema: #schema,
                    properties: &[#(#properties),*],
                };
                &SCHEMA
            }
        }
    }
}

fn property(entity: &EntityDef, field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let kind = field.kind();
    let type_text = field.type_text();

    let column = field
        .column_override(entity.rename_all)
        .map(|column| quote!(.column(#column)));
    let flags = field
        .storage
        .flags_tokens()
        .map(|flags| quote!(.flags(#flags)));
    let nullable = field.is_option().then(|| quote!(.nullable()));
    let reference = field.reference.as_ref().map(|reference| {
        let target = &reference.target;
        let fields = reference.field_names();
        quote!(.reference(<#target as ::sqlmeta::Persistent>::schema, &[#(#fields),*]))
    });

    quote! {
        ::sqlmeta::PropertyDef::new(#name, #kind)
            .typed(#type_text)
            #column
            #flags
            #nullable
            #reference
    }
}
