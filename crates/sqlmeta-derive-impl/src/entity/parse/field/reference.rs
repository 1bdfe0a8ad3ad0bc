// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Foreign view declarations from `#[reference(...)]`.
//!
//! ```rust,ignore
//! #[reference(Department, fields(id, title))]
//! pub department: Option<Department>,
//! ```
//!
//! The target must itself derive `Entity`. Only the listed properties are
//! carried, and they are checked against the target when the entity is
//! resolved at runtime.

use syn::{Attribute, Ident, Meta, Path};

/// Parsed `#[reference(Target, fields(...))]`.
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    /// Path of the target entity type.
    pub target: Path,

    /// Target properties carried by the view.
    pub fields: Vec<Ident>
}

impl ReferenceConfig {
    /// Parse a `#[reference(...)]` attribute.
    ///
    /// # Errors
    ///
    /// Fails when the target or the field list is missing, or when more
    /// than one target is named.
    pub fn from_attr(attr: &Attribute) -> darling::Result<Self> {
        let Meta::List(meta_list) = &attr.meta else {
            return Err(darling::Error::custom(
                "expected #[reference(Target, fields(...))]"
            )
            .with_span(attr));
        };

        let mut target: Option<Path> = None;
        let mut fields = Vec::new();

        meta_list.parse_nested_meta(|meta| {
            if meta.path.is_ident("fields") {
                meta.parse_nested_meta(|inner| {
                    fields.push(inner.path.require_ident()?.clone());
                    Ok(())
                })
            } else if target.is_none() {
                target = Some(meta.path.clone());
                Ok(())
            } else {
                Err(meta.error("reference accepts a single target entity"))
            }
        })?;

        let target = target.ok_or_else(|| {
            darling::Error::custom("reference requires a target entity").with_span(attr)
        })?;
        if fields.is_empty() {
            return Err(
                darling::Error::custom("reference requires a non-empty fields(...) list")
                    .with_span(attr)
            );
        }

        Ok(Self {
            target,
            fields
        })
    }

    /// Field names as strings.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(ToString::to_string).collect()
    }
}
