// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column overrides from `#[column(...)]`.
//!
//! | Attribute | Example | Effect |
//! |-----------|---------|--------|
//! | `name` | `#[column(name = "dept_title")]` | Column name instead of the field name |
//! | `kind` | `#[column(kind = "integer")]` | Property kind instead of the inferred one |
//!
//! An explicit name also wins over `#[entity(rename_all = "...")]`.

use darling::FromMeta;
use syn::{Attribute, LitStr, Meta};

use crate::entity::parse::PropertyKind;

/// Parsed `#[column(...)]` options.
#[derive(Debug, Clone, Default)]
pub struct ColumnConfig {
    /// Column name override.
    pub name: Option<String>,

    /// Property kind override.
    pub kind: Option<PropertyKind>
}

impl ColumnConfig {
    /// Parse column config from a `#[column(...)]` attribute.
    ///
    /// # Errors
    ///
    /// Unknown options, non-string values and unknown kinds are reported
    /// at the offending token.
    pub fn from_attr(attr: &Attribute) -> darling::Result<Self> {
        let mut config = Self::default();
        let mut kind: Option<LitStr> = None;

        if let Meta::List(meta_list) = &attr.meta {
            meta_list.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let _: syn::Token![=] = meta.input.parse()?;
                    let value: LitStr = meta.input.parse()?;
                    config.name = Some(value.value());
                } else if meta.path.is_ident("kind") {
                    let _: syn::Token![=] = meta.input.parse()?;
                    kind = Some(meta.input.parse()?);
                } else {
                    return Err(meta.error("expected `name` or `kind`"));
                }
                Ok(())
            })?;
        } else {
            return Err(darling::Error::custom(
                "expected #[column(name = \"...\")] or #[column(kind = \"...\")]"
            )
            .with_span(attr));
        }

        if let Some(lit) = kind {
            config.kind =
                Some(PropertyKind::from_string(&lit.value()).map_err(|e| e.with_span(&lit))?);
        }

        Ok(config)
    }
}
