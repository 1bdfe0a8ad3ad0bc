// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level parsing.
//!
//! Combines the darling-parsed [`EntityAttrs`] with per-field definitions
//! and checks cross-field rules: each marker (`#[id]`, `#[tenant]`,
//! `#[logic_delete]`, `#[updated_by]`) may appear on at most one field.
//!
//! A missing `#[id]` is not an error. Such entities still support reads;
//! identifier-scoped operations fail at runtime.

mod attrs;

use attrs::EntityAttrs;
use convert_case::{Case, Casing};
use darling::FromDeriveInput;
use syn::{DeriveInput, Ident};

use super::{FieldDef, RenameRule};

/// Complete parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Database table name.
    pub table: String,

    /// Optional schema qualifier.
    pub schema: Option<String>,

    /// Column rename rule.
    pub rename_all: Option<RenameRule>,

    /// All fields, including transient ones.
    pub fields: Vec<FieldDef>
}

impl EntityDef {
    /// Parse entity definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// Returns darling errors for malformed attributes, generic structs,
    /// non-struct inputs and duplicated markers.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;

        if !attrs.generics.params.is_empty() {
            return Err(
                darling::Error::custom("Entity cannot be derived for generic structs")
                    .with_span(&attrs.generics)
            );
        }

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Entity requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Entity can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        check_unique(&fields, "id", |f| f.storage.is_id)?;
        check_unique(&fields, "tenant", |f| f.storage.is_tenant)?;
        check_unique(&fields, "logic_delete", |f| f.storage.is_logic_delete)?;
        check_unique(&fields, "updated_by", |f| f.storage.is_updated_by)?;

        let table = attrs
            .table
            .unwrap_or_else(|| attrs.ident.to_string().to_case(Case::Snake));

        Ok(Self {
            ident: attrs.ident,
            table,
            schema: attrs.schema,
            rename_all: attrs.rename_all,
            fields
        })
    }

    /// Get the struct name as a String.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Fields that become properties, in declaration order.
    pub fn persistent_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.is_transient())
    }
}

/// Fail on the second field carrying a marker.
fn check_unique(
    fields: &[FieldDef],
    marker: &str,
    is_marked: impl Fn(&FieldDef) -> bool
) -> darling::Result<()> {
    let mut marked = fields.iter().filter(|f| is_marked(f));
    marked.next();

    match marked.next() {
        Some(duplicate) => Err(darling::Error::custom(format!(
            "at most one field may be marked #[{marker}]"
        ))
        .with_span(&duplicate.ident)),
        None => Ok(())
    }
}

#[cfg(test)]
mod tests;
