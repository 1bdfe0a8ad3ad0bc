// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query derive macro implementation.
//!
//! For a query object like:
//!
//! ```rust,ignore
//! #[derive(Query)]
//! pub struct PersonQuery {
//!     #[predicate(eq)]
//!     pub name:          Option<String>,
//!     #[order(precedence = 1, property = "name")]
//!     pub order_by_name: Option<Direction>,
//!     #[limit]
//!     pub limit:         Option<u64>
//! }
//! ```
//!
//! The macro generates a static field table and a `QuerySource` impl that
//! pairs each descriptor with the current field value:
//!
//! ```rust,ignore
//! impl PersonQuery {
//!     pub fn query_fields() -> &'static [::sqlmeta::QueryField] {
//!         static FIELDS: [::sqlmeta::QueryField; 3] = [
//!             ::sqlmeta::QueryField::predicate("name", ::sqlmeta::Comparator::Eq),
//!             ::sqlmeta::QueryField::order("order_by_name", 1u32).on("name"),
//!             ::sqlmeta::QueryField::limit("limit"),
//!         ];
//!         &FIELDS
//!     }
//! }
//!
//! impl ::sqlmeta::QuerySource for PersonQuery {
//!     fn shape(&self) -> ::sqlmeta::QueryShape<'_> {
//!         let fields = Self::query_fields();
//!         ::sqlmeta::QueryShape::Flat(vec![
//!             ::sqlmeta::FieldValue::new(&fields[0], ::sqlmeta::ToValue::to_value(&self.name)),
//!             // ...
//!         ])
//!     }
//! }
//! ```

mod parse;

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::QueryDef;

/// Main entry point for the Query derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match QueryDef::from_derive_input(&input) {
        Ok(query) => generate(&query).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(query: &QueryDef) -> TokenStream2 {
    let ident = &query.ident;
    let (impl_generics, ty_generics, where_clause) = query.generics.split_for_impl();
    let len = query.fields.len();
    let descriptors = query.fields.iter().map(|f| f.descriptor());

    let shape = if query.fields.is_empty() {
        quote!(::sqlmeta::QueryShape::Flat(::std::vec::Vec::new()))
    } else {
        let values = query.fields.iter().enumerate().map(|(i, f)| {
            let index = Literal::usize_unsuffixed(i);
            let field = &f.ident;
            quote! {
                ::sqlmeta::FieldValue::new(
                    &fields[#index],
                    ::sqlmeta::ToValue::to_value(&self.#field)
                )
            }
        });
        quote! {
            let fields = Self::query_fields();
            ::sqlmeta::QueryShape::Flat(::std::vec![#(#values),*])
        }
    };

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            /// Descriptors of the annotated query fields, in declaration order.
            pub fn query_fields() -> &'static [::sqlmeta::QueryField] {
                static FIELDS: [::sqlmeta::QueryField; #len] = [#(#descriptors),*];
                &FIELDS
            }
        }

        impl #impl_generics ::sqlmeta::QuerySource for #ident #ty_generics #where_clause {
            fn shape(&self) -> ::sqlmeta::QueryShape<'_> {
                #shape
            }
        }
    }
}
