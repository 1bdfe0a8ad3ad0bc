// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Query derive macro.
//!
//! # Field Attributes
//!
//! | Attribute | Options |
//! |-----------|---------|
//! | `#[predicate(op)]` | `op` is one of `eq`, `ne`, `lt`, `le`, `gt`, `ge`, `like`, `in`, `is_null`; optional `property = ".."` |
//! | `#[order]` | optional `precedence = N` (default 0), optional `property = ".."` |
//! | `#[limit]` | none |
//! | `#[offset]` | none |
//!
//! A field carries at most one of these. Fields without any are ignored.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, DeriveInput, Generics, Ident, LitInt, LitStr, Meta, meta::ParseNestedMeta};

/// Compile-time mirror of `sqlmeta::Comparator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    In,
    IsNull
}

impl Comparator {
    fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "lt" => Some(Self::Lt),
            "le" => Some(Self::Le),
            "gt" => Some(Self::Gt),
            "ge" => Some(Self::Ge),
            "like" => Some(Self::Like),
            "in" | "is_in" => Some(Self::In),
            "is_null" => Some(Self::IsNull),
            _ => None
        }
    }
}

impl ToTokens for Comparator {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            Self::Eq => quote!(Eq),
            Self::Ne => quote!(Ne),
            Self::Lt => quote!(Lt),
            Self::Le => quote!(Le),
            Self::Gt => quote!(Gt),
            Self::Ge => quote!(Ge),
            Self::Like => quote!(Like),
            Self::In => quote!(In),
            Self::IsNull => quote!(IsNull)
        };
        tokens.extend(quote!(::sqlmeta::Comparator::#variant));
    }
}

/// Role of an annotated query field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFieldKind {
    /// `#[predicate(..)]`
    Predicate(Comparator),
    /// `#[order(..)]`
    Order {
        /// Sort key among order fields, ascending.
        precedence: u32
    },
    /// `#[limit]`
    Limit,
    /// `#[offset]`
    Offset
}

/// One annotated field of a query struct.
#[derive(Debug)]
pub struct QueryFieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field role.
    pub kind: QueryFieldKind,

    /// Target property, when it differs from the field name.
    pub property: Option<String>
}

impl QueryFieldDef {
    /// Parse the query attribute of a field, if it has one.
    ///
    /// # Errors
    ///
    /// Fails on malformed attributes and on fields carrying more than one
    /// query attribute.
    pub fn from_field(field: &syn::Field) -> darling::Result<Option<Self>> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Query fields must be named").with_span(field)
        })?;

        let mut parsed: Option<(QueryFieldKind, Option<String>)> = None;

        for attr in &field.attrs {
            let current = if attr.path().is_ident("predicate") {
                parse_predicate(attr)?
            } else if attr.path().is_ident("order") {
                parse_order(attr)?
            } else if attr.path().is_ident("limit") {
                parse_marker(attr)?;
                (QueryFieldKind::Limit, None)
            } else if attr.path().is_ident("offset") {
                parse_marker(attr)?;
                (QueryFieldKind::Offset, None)
            } else {
                continue;
            };

            if parsed.is_some() {
                return Err(darling::Error::custom(
                    "a query field may carry only one of #[predicate], #[order], #[limit], #[offset]"
                )
                .with_span(attr));
            }
            parsed = Some(current);
        }

        Ok(parsed.map(|(kind, property)| Self {
            ident,
            kind,
            property
        }))
    }

    /// Field name as a String.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// `QueryField` constructor expression for the static field table.
    #[must_use]
    pub fn descriptor(&self) -> TokenStream {
        let name = self.name_str();
        let base = match &self.kind {
            QueryFieldKind::Predicate(comparator) => {
                quote!(::sqlmeta::QueryField::predicate(#name, #comparator))
            }
            QueryFieldKind::Order {
                precedence
            } => quote!(::sqlmeta::QueryField::order(#name, #precedence)),
            QueryFieldKind::Limit => quote!(::sqlmeta::QueryField::limit(#name)),
            QueryFieldKind::Offset => quote!(::sqlmeta::QueryField::offset(#name))
        };

        match &self.property {
            Some(property) => quote!(#base.on(#property)),
            None => base
        }
    }
}

/// Parsed query struct.
#[derive(Debug)]
pub struct QueryDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics, forwarded to the generated impls.
    pub generics: Generics,

    /// Annotated fields in declaration order.
    pub fields: Vec<QueryFieldDef>
}

impl QueryDef {
    /// Parse a query struct.
    ///
    /// # Errors
    ///
    /// Rejects non-structs, tuple structs, malformed field attributes and
    /// more than one `#[limit]` or `#[offset]` field.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let named = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => &named.named,
                _ => {
                    return Err(darling::Error::custom("Query requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Query can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let mut errors = darling::Error::accumulator();
        let fields: Vec<QueryFieldDef> = named
            .iter()
            .filter_map(|field| errors.handle(QueryFieldDef::from_field(field)).flatten())
            .collect();

        for (kind, label) in [
            (QueryFieldKind::Limit, "#[limit]"),
            (QueryFieldKind::Offset, "#[offset]")
        ] {
            if let Some(duplicate) = fields.iter().filter(|f| f.kind == kind).nth(1) {
                errors.push(
                    darling::Error::custom(format!("at most one field may be marked {label}"))
                        .with_span(&duplicate.ident)
                );
            }
        }

        errors.finish()?;

        Ok(Self {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            fields
        })
    }
}

fn parse_predicate(attr: &Attribute) -> darling::Result<(QueryFieldKind, Option<String>)> {
    let Meta::List(meta_list) = &attr.meta else {
        return Err(
            darling::Error::custom("expected #[predicate(op)], e.g. #[predicate(eq)]")
                .with_span(attr)
        );
    };

    let mut comparator = None;
    let mut property = None;

    meta_list.parse_nested_meta(|meta| {
        if meta.path.is_ident("property") {
            property = Some(parse_str_value(&meta)?);
            return Ok(());
        }

        let op = meta
            .path
            .get_ident()
            .and_then(|ident| Comparator::from_ident(&ident.to_string()))
            .ok_or_else(|| {
                meta.error(
                    "unknown predicate; expected one of eq, ne, lt, le, gt, ge, like, in, is_null"
                )
            })?;
        if comparator.replace(op).is_some() {
            return Err(meta.error("a predicate takes a single comparator"));
        }
        Ok(())
    })?;

    let comparator = comparator.ok_or_else(|| {
        darling::Error::custom("#[predicate] requires a comparator, e.g. #[predicate(eq)]")
            .with_span(attr)
    })?;

    Ok((QueryFieldKind::Predicate(comparator), property))
}

fn parse_order(attr: &Attribute) -> darling::Result<(QueryFieldKind, Option<String>)> {
    let mut precedence = 0u32;
    let mut property = None;

    match &attr.meta {
        Meta::Path(_) => {}
        Meta::List(meta_list) => {
            meta_list.parse_nested_meta(|meta| {
                if meta.path.is_ident("precedence") {
                    let _: syn::Token![=] = meta.input.parse()?;
                    let value: LitInt = meta.input.parse()?;
                    precedence = value.base10_parse()?;
                } else if meta.path.is_ident("property") {
                    property = Some(parse_str_value(&meta)?);
                } else {
                    return Err(meta.error("expected `precedence` or `property`"));
                }
                Ok(())
            })?;
        }
        Meta::NameValue(_) => {
            return Err(
                darling::Error::custom("expected #[order] or #[order(precedence = N)]")
                    .with_span(attr)
            );
        }
    }

    Ok((
        QueryFieldKind::Order {
            precedence
        },
        property
    ))
}

fn parse_marker(attr: &Attribute) -> darling::Result<()> {
    match &attr.meta {
        Meta::Path(_) => Ok(()),
        _ => Err(darling::Error::custom("this attribute takes no arguments").with_span(attr))
    }
}

fn parse_str_value(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    let _: syn::Token![=] = meta.input.parse()?;
    let value: LitStr = meta.input.parse()?;
    Ok(value.value())
}

#[cfg(test)]
mod tests {
    use syn::{Field, parse_quote};

    use super::*;

    fn field(f: Field) -> darling::Result<Option<QueryFieldDef>> {
        QueryFieldDef::from_field(&f)
    }

    #[test]
    fn unannotated_field_is_ignored() {
        assert!(field(parse_quote!(pub note: String)).unwrap().is_none());
    }

    #[test]
    fn predicate_with_property() {
        let def = field(parse_quote! {
            #[predicate(ge, property = "age")]
            pub min_age: Option<i32>
        })
        .unwrap()
        .unwrap();
        assert_eq!(def.kind, QueryFieldKind::Predicate(Comparator::Ge));
        assert_eq!(def.property.as_deref(), Some("age"));
    }

    #[test]
    fn predicate_keywords() {
        let def = field(parse_quote! {
            #[predicate(in)]
            pub ids: Vec<i64>
        })
        .unwrap()
        .unwrap();
        assert_eq!(def.kind, QueryFieldKind::Predicate(Comparator::In));

        let def = field(parse_quote! {
            #[predicate(is_null, property = "deleted_at")]
            pub deleted: Option<bool>
        })
        .unwrap()
        .unwrap();
        assert_eq!(def.kind, QueryFieldKind::Predicate(Comparator::IsNull));
    }

    #[test]
    fn order_defaults_and_options() {
        let def = field(parse_quote! {
            #[order]
            pub sort: Option<Direction>
        })
        .unwrap()
        .unwrap();
        assert_eq!(
            def.kind,
            QueryFieldKind::Order {
                precedence: 0
            }
        );
        assert!(def.property.is_none());

        let def = field(parse_quote! {
            #[order(precedence = 2, property = "age")]
            pub order_by_age: Option<String>
        })
        .unwrap()
        .unwrap();
        assert_eq!(
            def.kind,
            QueryFieldKind::Order {
                precedence: 2
            }
        );
        assert_eq!(def.property.as_deref(), Some("age"));
    }

    #[test]
    fn limit_and_offset_markers() {
        let def = field(parse_quote!(#[limit] pub limit: Option<u64>))
            .unwrap()
            .unwrap();
        assert_eq!(def.kind, QueryFieldKind::Limit);
        let def = field(parse_quote!(#[offset] pub skip: u64)).unwrap().unwrap();
        assert_eq!(def.kind, QueryFieldKind::Offset);
    }

    #[test]
    fn missing_comparator_is_rejected() {
        assert!(field(parse_quote!(#[predicate(property = "x")] pub x: i32)).is_err());
        assert!(field(parse_quote!(#[predicate] pub x: i32)).is_err());
    }

    #[test]
    fn unknown_comparator_is_rejected() {
        assert!(field(parse_quote!(#[predicate(between)] pub x: i32)).is_err());
    }

    #[test]
    fn two_comparators_are_rejected() {
        assert!(field(parse_quote!(#[predicate(eq, ne)] pub x: i32)).is_err());
    }

    #[test]
    fn two_roles_are_rejected() {
        let result = field(parse_quote! {
            #[predicate(eq)]
            #[order]
            pub name: Option<String>
        });
        assert!(result.is_err());
    }

    #[test]
    fn limit_with_arguments_is_rejected() {
        assert!(field(parse_quote!(#[limit(10)] pub limit: u64)).is_err());
    }

    #[test]
    fn invalid_precedence_is_rejected() {
        assert!(field(parse_quote!(#[order(precedence = -1)] pub o: Option<String>)).is_err());
        assert!(field(parse_quote!(#[order(weight = 1)] pub o: Option<String>)).is_err());
    }

    #[test]
    fn descriptor_tokens() {
        let def = field(parse_quote! {
            #[order(precedence = 1, property = "name")]
            pub order_by_name: Option<String>
        })
        .unwrap()
        .unwrap();
        let tokens = def.descriptor().to_string().replace(' ', "");
        assert_eq!(
            tokens,
            "::sqlmeta::QueryField::order(\"order_by_name\",1u32).on(\"name\")"
        );
    }

    #[test]
    fn duplicate_limit_is_rejected() {
        let input: DeriveInput = parse_quote! {
            pub struct Page {
                #[limit]
                pub a: u64,
                #[limit]
                pub b: u64,
            }
        };
        assert!(QueryDef::from_derive_input(&input).is_err());
    }

    #[test]
    fn tuple_struct_is_rejected() {
        let input: DeriveInput = parse_quote!(pub struct Page(u64););
        assert!(QueryDef::from_derive_input(&input).is_err());
    }
}
